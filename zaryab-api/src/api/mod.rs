//! HTTP API handlers for zaryab-api

pub mod about;
pub mod articles;
pub mod authors;
pub mod authors_archive;
pub mod books;
pub mod buildinfo;
pub mod episodes;
pub mod featured;
pub mod health;
pub mod letters;
pub mod newsletter;
pub mod podcasts;
pub mod poems;
pub mod reviews;
pub mod search;
pub mod stories;
pub mod taxonomies;

pub use about::get_about_us;
pub use articles::{get_article, list_articles, similar_articles};
pub use authors::{get_author, list_authors};
pub use authors_archive::{get_author_archive, list_authors_archive};
pub use books::{featured_book, get_book};
pub use buildinfo::get_build_info;
pub use episodes::get_episode;
pub use featured::{featured_story, latest_story_champion};
pub use health::health_routes;
pub use letters::{get_letter, list_letters};
pub use newsletter::subscribe;
pub use podcasts::{get_podcast, list_podcasts};
pub use poems::{get_poem, list_poems};
pub use reviews::{get_review, list_reviews, similar_reviews};
pub use search::global_search;
pub use stories::{get_story, list_stories, similar_stories, stories_in_collection};
pub use taxonomies::{list_categories, list_taxonomy_terms};

use zaryab_common::db::{ContentItem, PostType};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Look up a published item by slug, or answer 404 with the given code
pub(crate) async fn find_or_404(
    state: &AppState,
    post_type: PostType,
    slug: &str,
    code: &'static str,
    message: &'static str,
) -> ApiResult<ContentItem> {
    state
        .repo
        .find_by_slug(post_type, slug)
        .await?
        .ok_or_else(|| ApiError::not_found(code, message))
}

/// Split a comma-separated slug list, dropping blank entries
pub fn split_slugs(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
