//! Content models
//!
//! Posts of every content type share one shape ([`ContentItem`]); type-specific
//! data lives in custom fields stored as JSON values keyed by field name.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// Content types served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostType {
    #[serde(rename = "page")]
    Page,
    #[serde(rename = "articles")]
    Article,
    #[serde(rename = "review")]
    Review,
    #[serde(rename = "authors")]
    Author,
    #[serde(rename = "authors_archive")]
    AuthorArchive,
    #[serde(rename = "book")]
    Book,
    #[serde(rename = "stories")]
    Story,
    #[serde(rename = "episodes")]
    Episode,
    #[serde(rename = "featured_story")]
    FeaturedStory,
    #[serde(rename = "story_champion")]
    StoryChampion,
    #[serde(rename = "poem")]
    Poem,
    #[serde(rename = "podcast")]
    Podcast,
    #[serde(rename = "letters")]
    Letter,
}

impl PostType {
    pub const ALL: [PostType; 13] = [
        PostType::Page,
        PostType::Article,
        PostType::Review,
        PostType::Author,
        PostType::AuthorArchive,
        PostType::Book,
        PostType::Story,
        PostType::Episode,
        PostType::FeaturedStory,
        PostType::StoryChampion,
        PostType::Poem,
        PostType::Podcast,
        PostType::Letter,
    ];

    /// Name stored in `posts.post_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Page => "page",
            PostType::Article => "articles",
            PostType::Review => "review",
            PostType::Author => "authors",
            PostType::AuthorArchive => "authors_archive",
            PostType::Book => "book",
            PostType::Story => "stories",
            PostType::Episode => "episodes",
            PostType::FeaturedStory => "featured_story",
            PostType::StoryChampion => "story_champion",
            PostType::Poem => "poem",
            PostType::Podcast => "podcast",
            PostType::Letter => "letters",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown post type: {}", s)))
    }
}

/// Classification systems whose terms attach to posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    Categories,
    Collection,
    StoryType,
    PoemType,
    LetterType,
    ReviewType,
    PodcastType,
    ArticleType,
}

impl Taxonomy {
    pub const ALL: [Taxonomy; 8] = [
        Taxonomy::Categories,
        Taxonomy::Collection,
        Taxonomy::StoryType,
        Taxonomy::PoemType,
        Taxonomy::LetterType,
        Taxonomy::ReviewType,
        Taxonomy::PodcastType,
        Taxonomy::ArticleType,
    ];

    /// Name stored in `terms.taxonomy`
    pub fn as_str(&self) -> &'static str {
        match self {
            Taxonomy::Categories => "categories",
            Taxonomy::Collection => "collection",
            Taxonomy::StoryType => "story_type",
            Taxonomy::PoemType => "poem_type",
            Taxonomy::LetterType => "letter_type",
            Taxonomy::ReviewType => "review_type",
            Taxonomy::PodcastType => "podcast_type",
            Taxonomy::ArticleType => "article_type",
        }
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Taxonomy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Taxonomy::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown taxonomy: {}", s)))
    }
}

/// Reference held by a relation field (`author`, `story`)
///
/// Stored values come in several shapes: a bare id, a numeric string, an object
/// carrying `id`/`ID`, or an array whose first element is one of those.
/// [`Relation::from_value`] collapses all of them so callers only ever see
/// `None` or `Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Relation {
    #[default]
    None,
    Id(i64),
}

impl Relation {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_i64().filter(|id| *id > 0).map_or(Relation::None, Relation::Id),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .map_or(Relation::None, Relation::Id),
            Value::Object(map) => map
                .get("id")
                .or_else(|| map.get("ID"))
                .map_or(Relation::None, Relation::from_value),
            Value::Array(items) => items.first().map_or(Relation::None, Relation::from_value),
            _ => Relation::None,
        }
    }
}

/// A published post of any content type
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub id: i64,
    pub post_type: PostType,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub fields: BTreeMap<String, Value>,
}

impl ContentItem {
    /// Raw custom field value, `Null` when absent
    pub fn field(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or(Value::Null)
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Integer field; numeric strings are accepted
    pub fn field_i64(&self, key: &str) -> Option<i64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// URL of an image or file field (plain URL or object with `url`)
    pub fn url_field(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(url_of)
    }

    pub fn relation(&self, key: &str) -> Relation {
        self.fields.get(key).map_or(Relation::None, Relation::from_value)
    }

    /// Rows of a repeater field, empty when absent or malformed
    pub fn rows(&self, key: &str) -> &[Value] {
        match self.fields.get(key) {
            Some(Value::Array(rows)) => rows,
            _ => &[],
        }
    }
}

/// Extract a URL from an image/file value
pub fn url_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// A taxonomy term; `count` is the number of published posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub taxonomy: Taxonomy,
    pub name: String,
    pub slug: String,
    pub count: i64,
}
