//! Articles, reviews, books, letters, podcasts, pages and search hits

use serde::Serialize;
use serde_json::Value;
use zaryab_common::db::{url_of, ContentItem, Term};

use super::people::{author_name, author_profile, AuthorProfile};
use super::taxonomy::{format_terms, TermRef};
use super::text::{auto_excerpt, autop};

/// List entry shared by articles and author reviews
#[derive(Debug, Serialize)]
pub struct EditorialSummary {
    pub image: Option<String>,
    pub title: String,
    pub excerpt: String,
    pub slug: String,
    pub author: String,
    pub date_shamsi: Value,
    pub time: Value,
    pub categories: Vec<TermRef>,
}

impl EditorialSummary {
    pub fn new(item: &ContentItem, author: Option<&ContentItem>, categories: &[Term]) -> Self {
        Self {
            image: item.featured_image.clone(),
            title: item.title.clone(),
            excerpt: auto_excerpt(&item.excerpt, &item.content),
            slug: item.slug.clone(),
            author: author_name(author),
            date_shamsi: item.field("date_shamsi"),
            time: item.field("time"),
            categories: format_terms(Some(categories)),
        }
    }
}

/// Single article or review
#[derive(Debug, Serialize)]
pub struct EditorialDetail {
    pub big_image: Option<String>,
    pub title: String,
    pub date_shamsi: Value,
    pub time: Value,
    pub categories: Vec<TermRef>,
    pub author: Option<AuthorProfile>,
    pub content: String,
}

impl EditorialDetail {
    pub fn new(item: &ContentItem, author: Option<&ContentItem>, categories: &[Term]) -> Self {
        Self {
            big_image: item.url_field("big_image"),
            title: item.title.clone(),
            date_shamsi: item.field("date_shamsi"),
            time: item.field("time"),
            categories: format_terms(Some(categories)),
            author: author_profile(author),
            content: autop(&item.content),
        }
    }
}

/// `/books/featured`
#[derive(Debug, Serialize)]
pub struct BookFeatured {
    pub title: String,
    pub featured_image: Option<String>,
    pub excerpt: String,
    pub slug: String,
    pub pdf: String,
}

impl BookFeatured {
    pub fn new(book: &ContentItem) -> Self {
        Self {
            title: book.title.clone(),
            featured_image: book.featured_image.clone(),
            excerpt: auto_excerpt(&book.excerpt, &book.content),
            slug: book.slug.clone(),
            pdf: book.url_field("pdf").unwrap_or_default(),
        }
    }
}

/// `/books/{slug}`
#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub featured_image: Option<String>,
    /// Free-text field, distinct from the `collection` taxonomy
    pub collection: Value,
    pub date_shamsi: Value,
    pub time: Value,
    pub categories: Vec<TermRef>,
    pub content: String,
    pub author: Option<AuthorProfile>,
}

impl BookDetail {
    pub fn new(book: &ContentItem, author: Option<&ContentItem>, categories: &[Term]) -> Self {
        Self {
            featured_image: book.featured_image.clone(),
            collection: book.field("collection"),
            date_shamsi: book.field("date_shamsi"),
            time: book.field("time"),
            categories: format_terms(Some(categories)),
            content: autop(&book.content),
            author: author_profile(author),
        }
    }
}

/// Entry of `/letters`
#[derive(Debug, Serialize)]
pub struct LetterSummary {
    pub featured_image: Option<String>,
    pub title: String,
    pub number: Value,
    pub release_date: Value,
    pub slug: String,
    pub pdf: String,
}

impl LetterSummary {
    pub fn new(letter: &ContentItem) -> Self {
        Self {
            featured_image: letter.featured_image.clone(),
            title: letter.title.clone(),
            number: letter.field("number"),
            release_date: letter.field("release_date"),
            slug: letter.slug.clone(),
            pdf: letter.url_field("pdf").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LetterImage {
    pub number: Value,
    pub image: Option<String>,
}

/// `/letters/{slug}`: the scanned pages of one letter
#[derive(Debug, Serialize)]
pub struct LetterDetail {
    pub number: Value,
    pub title: String,
    pub images: Vec<LetterImage>,
}

impl LetterDetail {
    pub fn new(letter: &ContentItem) -> Self {
        let images = letter
            .rows("images")
            .iter()
            .map(|row| LetterImage {
                number: row.get("number").cloned().unwrap_or(Value::Null),
                image: row.get("image").and_then(url_of),
            })
            .collect();

        Self {
            number: letter.field("number"),
            title: letter.title.clone(),
            images,
        }
    }
}

/// Entry of `/podcasts`
#[derive(Debug, Serialize)]
pub struct PodcastSummary {
    pub image: Option<String>,
    pub slug: String,
    pub name: String,
    pub host: Value,
    pub guest: Value,
    pub duration: Value,
    /// Publication day, `YYYY-MM-DD`
    pub date: String,
}

impl PodcastSummary {
    pub fn new(podcast: &ContentItem) -> Self {
        Self {
            image: podcast.featured_image.clone(),
            slug: podcast.slug.clone(),
            name: podcast.title.clone(),
            host: podcast.field("host"),
            guest: podcast.field("guest"),
            duration: podcast.field("duration"),
            date: podcast.published_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// `/podcasts/{slug}`
#[derive(Debug, Serialize)]
pub struct PodcastDetail {
    #[serde(flatten)]
    pub summary: PodcastSummary,
    pub content: String,
    pub audio: Option<String>,
    pub categories: Vec<TermRef>,
}

impl PodcastDetail {
    pub fn new(podcast: &ContentItem, categories: &[Term]) -> Self {
        Self {
            summary: PodcastSummary::new(podcast),
            content: autop(&podcast.content),
            audio: podcast.url_field("audio"),
            categories: format_terms(Some(categories)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Question {
    pub question: Value,
    pub answer: Value,
}

/// `/about-us`
#[derive(Debug, Serialize)]
pub struct AboutUs {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub questions: Vec<Question>,
}

impl AboutUs {
    pub fn new(page: &ContentItem) -> Self {
        let questions = page
            .rows("questions")
            .iter()
            .map(|row| Question {
                question: row.get("question").cloned().unwrap_or(Value::Null),
                answer: row.get("answer").cloned().unwrap_or(Value::Null),
            })
            .collect();

        Self {
            title: page.title.clone(),
            content: autop(&page.content),
            slug: page.slug.clone(),
            questions,
        }
    }
}

/// One matching item in a global search group
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub featured_image: Option<String>,
    pub slug: String,
}

impl From<&ContentItem> for SearchHit {
    fn from(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            featured_image: item.featured_image.clone(),
            slug: item.slug.clone(),
        }
    }
}
