//! Author-centred projections

use serde::Serialize;
use serde_json::Value;
use zaryab_common::db::ContentItem;

use super::text::{auto_excerpt, autop};

/// Full author profile embedded in detail projections
#[derive(Debug, Clone, Serialize)]
pub struct AuthorProfile {
    pub featured_image: Option<String>,
    pub name: String,
    pub location: Value,
    pub job: Value,
    pub total_letters: Value,
    pub age: Value,
    pub facebook: Value,
    pub instagram: Value,
    pub telegram: Value,
    pub youtube: Value,
}

impl AuthorProfile {
    pub fn new(author: &ContentItem) -> Self {
        Self {
            featured_image: author.featured_image.clone(),
            name: author.title.clone(),
            location: author.field("location"),
            job: author.field("job"),
            total_letters: author.field("total_letters"),
            age: author.field("age"),
            facebook: author.field("facebook"),
            instagram: author.field("instagram"),
            telegram: author.field("telegram"),
            youtube: author.field("youtube"),
        }
    }
}

/// Profile of a resolved author, `None` when the relation is empty
pub fn author_profile(author: Option<&ContentItem>) -> Option<AuthorProfile> {
    author.map(AuthorProfile::new)
}

/// Display name of a resolved author, empty when the relation is empty
pub fn author_name(author: Option<&ContentItem>) -> String {
    author.map(|a| a.title.clone()).unwrap_or_default()
}

/// Entry of `/authors`
#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub name: String,
    pub image: Option<String>,
    pub job: Value,
    pub location: Value,
    pub total_letters: Value,
}

impl AuthorSummary {
    pub fn new(author: &ContentItem) -> Self {
        Self {
            name: author.title.clone(),
            image: author.featured_image.clone(),
            job: author.field("job"),
            location: author.field("location"),
            total_letters: author.field("total_letters"),
        }
    }
}

/// `/authors/{slug}`
#[derive(Debug, Serialize)]
pub struct AuthorDetail {
    pub name: String,
    /// Biography as stored, without paragraph formatting
    pub content: String,
    pub featured_image: Option<String>,
    pub location: Value,
    pub job: Value,
    pub total_letters: Value,
    pub age: Value,
    pub facebook: Value,
    pub instagram: Value,
    pub telegram: Value,
    pub youtube: Value,
}

impl AuthorDetail {
    pub fn new(author: &ContentItem) -> Self {
        let profile = AuthorProfile::new(author);
        Self {
            name: profile.name,
            content: author.content.clone(),
            featured_image: profile.featured_image,
            location: profile.location,
            job: profile.job,
            total_letters: profile.total_letters,
            age: profile.age,
            facebook: profile.facebook,
            instagram: profile.instagram,
            telegram: profile.telegram,
            youtube: profile.youtube,
        }
    }
}

/// Entry of `/authors-archive`
#[derive(Debug, Serialize)]
pub struct AuthorArchiveSummary {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
}

impl AuthorArchiveSummary {
    pub fn new(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            slug: item.slug.clone(),
            excerpt: auto_excerpt(&item.excerpt, &item.content),
            featured_image: item.featured_image.clone(),
        }
    }
}

/// `/authors-archive/{slug}`
#[derive(Debug, Serialize)]
pub struct AuthorArchiveDetail {
    pub featured_image: Option<String>,
    pub title: String,
    pub location: Value,
    pub age: Value,
    pub job: Value,
    pub total_letters: Value,
    pub content: String,
}

impl AuthorArchiveDetail {
    pub fn new(item: &ContentItem) -> Self {
        Self {
            featured_image: item.featured_image.clone(),
            title: item.title.clone(),
            location: item.field("location"),
            age: item.field("age"),
            job: item.field("job"),
            total_letters: item.field("total_letters"),
            content: autop(&item.content),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChampionAuthor {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct ChampionStory {
    pub title: String,
    pub excerpt: String,
    pub slug: String,
}

/// `/story-champion/latest`
#[derive(Debug, Serialize)]
pub struct StoryChampion {
    pub featured_image: Option<String>,
    pub author: Option<ChampionAuthor>,
    pub story: Option<ChampionStory>,
}

impl StoryChampion {
    pub fn new(
        champion: &ContentItem,
        author: Option<&ContentItem>,
        story: Option<&ContentItem>,
    ) -> Self {
        Self {
            featured_image: champion.featured_image.clone(),
            author: author.map(|a| ChampionAuthor {
                name: a.title.clone(),
                slug: a.slug.clone(),
            }),
            story: story.map(|s| ChampionStory {
                title: s.title.clone(),
                excerpt: auto_excerpt(&s.excerpt, &s.content),
                slug: s.slug.clone(),
            }),
        }
    }
}
