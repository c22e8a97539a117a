//! Stories, episodes and poems

use serde::Serialize;
use serde_json::Value;
use zaryab_common::db::{ContentItem, Term};

use super::people::{author_name, author_profile, AuthorProfile};
use super::taxonomy::{format_terms, TermRef};
use super::text::{auto_excerpt, autop, excerpt_by_lines};

/// Lines kept by a poem list excerpt
pub const POEM_EXCERPT_LINES: usize = 3;

/// Entry of `/stories`, also the body of `/featured-story`
#[derive(Debug, Serialize)]
pub struct StorySummary {
    pub featured_image: Option<String>,
    pub title: String,
    pub excerpt: String,
    pub slug: String,
    pub author: String,
    pub date: Value,
    pub duration: Value,
    pub categories: Vec<TermRef>,
}

impl StorySummary {
    pub fn new(story: &ContentItem, author: Option<&ContentItem>, categories: &[Term]) -> Self {
        Self {
            featured_image: story.featured_image.clone(),
            title: story.title.clone(),
            excerpt: auto_excerpt(&story.excerpt, &story.content),
            slug: story.slug.clone(),
            author: author_name(author),
            date: story.field("date"),
            duration: story.field("duration"),
            categories: format_terms(Some(categories)),
        }
    }
}

/// Episode listed inside a story
#[derive(Debug, Serialize)]
pub struct EpisodeRef {
    pub slug: String,
    pub title: String,
    pub episode_number: Option<i64>,
    pub episode_title: Value,
}

impl From<&ContentItem> for EpisodeRef {
    fn from(episode: &ContentItem) -> Self {
        Self {
            slug: episode.slug.clone(),
            title: episode.title.clone(),
            episode_number: episode.field_i64("episode_number"),
            episode_title: episode.field("episode_title"),
        }
    }
}

/// Related items a story detail is assembled from
#[derive(Debug, Default, Clone, Copy)]
pub struct StoryContext<'a> {
    pub author: Option<&'a ContentItem>,
    pub categories: &'a [Term],
    pub collection: &'a [Term],
    /// Already ordered by episode number
    pub episodes: &'a [ContentItem],
}

/// `/stories/{slug}`
#[derive(Debug, Serialize)]
pub struct StoryDetail {
    pub featured_image: Option<String>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author: Option<AuthorProfile>,
    pub categories: Vec<TermRef>,
    pub collection: Vec<TermRef>,
    pub date: Value,
    pub duration: Value,
    pub episodes: Vec<EpisodeRef>,
}

impl StoryDetail {
    pub fn new(story: &ContentItem, ctx: StoryContext<'_>) -> Self {
        Self {
            featured_image: story.featured_image.clone(),
            title: story.title.clone(),
            slug: story.slug.clone(),
            content: autop(&story.content),
            author: author_profile(ctx.author),
            categories: format_terms(Some(ctx.categories)),
            collection: format_terms(Some(ctx.collection)),
            date: story.field("date"),
            duration: story.field("duration"),
            episodes: ctx.episodes.iter().map(EpisodeRef::from).collect(),
        }
    }
}

/// Related items an episode detail is assembled from
///
/// `author` and `collection` belong to the parent story.
#[derive(Debug, Default, Clone)]
pub struct EpisodeContext<'a> {
    pub story: Option<&'a ContentItem>,
    pub author: Option<&'a ContentItem>,
    pub categories: &'a [Term],
    pub collection: &'a [Term],
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// `/episodes/{slug}`
#[derive(Debug, Serialize)]
pub struct EpisodeDetail {
    pub title: String,
    pub author: Option<AuthorProfile>,
    pub collection: Vec<TermRef>,
    pub categories: Vec<TermRef>,
    pub date: Value,
    pub time: Value,
    pub story_slug: String,
    pub content: String,
    pub episode_title: Value,
    pub previous_episode: Option<String>,
    pub next_episode: Option<String>,
}

impl EpisodeDetail {
    pub fn new(episode: &ContentItem, ctx: EpisodeContext<'_>) -> Self {
        Self {
            title: episode.title.clone(),
            author: author_profile(ctx.author),
            collection: format_terms(Some(ctx.collection)),
            categories: format_terms(Some(ctx.categories)),
            date: episode.field("date"),
            time: episode.field("time"),
            story_slug: ctx.story.map(|s| s.slug.clone()).unwrap_or_default(),
            content: autop(&episode.content),
            episode_title: episode.field("episode_title"),
            previous_episode: ctx.previous,
            next_episode: ctx.next,
        }
    }
}

/// Entry of `/poems`
#[derive(Debug, Serialize)]
pub struct PoemSummary {
    pub title: String,
    pub featured_image: Option<String>,
    pub excerpt: String,
    pub author: String,
    pub slug: String,
    pub date: Value,
    pub time: Value,
    pub poem_type: Vec<TermRef>,
}

impl PoemSummary {
    pub fn new(poem: &ContentItem, author: Option<&ContentItem>, poem_types: &[Term]) -> Self {
        Self {
            title: poem.title.clone(),
            featured_image: poem.featured_image.clone(),
            excerpt: excerpt_by_lines(&poem.content, POEM_EXCERPT_LINES),
            author: author_name(author),
            slug: poem.slug.clone(),
            date: poem.field("date"),
            time: poem.field("time"),
            poem_type: format_terms(Some(poem_types)),
        }
    }
}

/// `/poems/{slug}`
#[derive(Debug, Serialize)]
pub struct PoemDetail {
    pub title: String,
    pub featured_image: Option<String>,
    pub content: String,
    pub author: Option<AuthorProfile>,
    pub slug: String,
    pub date: Value,
    pub time: Value,
    pub poem_type: Vec<TermRef>,
}

impl PoemDetail {
    pub fn new(poem: &ContentItem, author: Option<&ContentItem>, poem_types: &[Term]) -> Self {
        Self {
            title: poem.title.clone(),
            featured_image: poem.featured_image.clone(),
            content: autop(&poem.content),
            author: author_profile(author),
            slug: poem.slug.clone(),
            date: poem.field("date"),
            time: poem.field("time"),
            poem_type: format_terms(Some(poem_types)),
        }
    }
}
