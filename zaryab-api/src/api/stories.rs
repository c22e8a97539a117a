//! Story endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use zaryab_common::db::{ContentItem, PostType, Taxonomy};

use super::{find_or_404, split_slugs};
use crate::adjacency::story_episodes_query;
use crate::error::{ApiError, ApiResult};
use crate::pagination::{ListParams, PageRequest, Paginated};
use crate::projection::{StoryContext, StoryDetail, StorySummary};
use crate::repository::{ContentQuery, TaxFilter};
use crate::AppState;

const NO_STORY: &str = "No story found with the provided slug";

#[derive(Debug, Default, Deserialize)]
pub struct StoryParams {
    #[serde(flatten)]
    pub list: ListParams,
    /// Comma-separated `categories` slugs
    pub categories: Option<String>,
}

async fn story_page(
    state: &AppState,
    query: ContentQuery,
    page: PageRequest,
) -> ApiResult<Paginated<StorySummary>> {
    let result = state.repo.query(&query.paged(page)).await?;

    let mut data = Vec::with_capacity(result.items.len());
    for story in &result.items {
        data.push(story_summary(state, story).await?);
    }
    Ok(Paginated::new(data, result.total, page))
}

async fn story_summary(state: &AppState, story: &ContentItem) -> ApiResult<StorySummary> {
    let author = state.repo.related(story, "author").await?;
    let categories = state.repo.post_terms(story.id, Taxonomy::Categories).await?;
    Ok(StorySummary::new(story, author.as_ref(), &categories))
}

/// GET /stories
pub async fn list_stories(
    State(state): State<AppState>,
    Query(params): Query<StoryParams>,
) -> ApiResult<Json<Paginated<StorySummary>>> {
    let page = state.page_request(&params.list);
    let query = ContentQuery::new(PostType::Story).with_tax(TaxFilter::any_of(
        Taxonomy::Categories,
        split_slugs(params.categories.as_deref()),
    ));
    Ok(Json(story_page(&state, query, page).await?))
}

/// GET /stories/similar/{slug}
pub async fn similar_stories(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<StorySummary>>> {
    let story = find_or_404(&state, PostType::Story, &slug, "no_story", NO_STORY).await?;
    let page = state.page_request(&params);
    let query = ContentQuery::new(PostType::Story).excluding(story.id);
    Ok(Json(story_page(&state, query, page).await?))
}

/// GET /stories/collection/{slug}
///
/// Stories carrying the given `collection` term.
pub async fn stories_in_collection(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<StorySummary>>> {
    let term = state
        .repo
        .find_term(Taxonomy::Collection, &slug)
        .await?
        .ok_or_else(|| {
            ApiError::not_found("no_collection", "No collection found with the provided slug")
        })?;

    let page = state.page_request(&params);
    let query = ContentQuery::new(PostType::Story)
        .with_tax(TaxFilter::any_of(Taxonomy::Collection, vec![term.slug]));
    Ok(Json(story_page(&state, query, page).await?))
}

/// GET /stories/{slug}
///
/// Includes every episode of the story in sequence order.
pub async fn get_story(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<StoryDetail>> {
    let story = find_or_404(&state, PostType::Story, &slug, "no_story", NO_STORY).await?;

    let author = state.repo.related(&story, "author").await?;
    let categories = state.repo.post_terms(story.id, Taxonomy::Categories).await?;
    let collection = state.repo.post_terms(story.id, Taxonomy::Collection).await?;
    let episodes = state.repo.query(&story_episodes_query(story.id)).await?.items;

    let ctx = StoryContext {
        author: author.as_ref(),
        categories: &categories,
        collection: &collection,
        episodes: &episodes,
    };
    Ok(Json(StoryDetail::new(&story, ctx)))
}
