//! Latest featured story and story champion

use axum::{extract::State, Json};
use zaryab_common::db::{PostType, Taxonomy};

use crate::error::{ApiError, ApiResult};
use crate::projection::{StoryChampion, StorySummary};
use crate::AppState;

/// GET /featured-story
///
/// Summary of the story linked from the newest featured-story entry.
pub async fn featured_story(State(state): State<AppState>) -> ApiResult<Json<StorySummary>> {
    let featured = state
        .repo
        .latest(PostType::FeaturedStory)
        .await?
        .ok_or_else(|| ApiError::not_found("no_featured_story", "No featured story found"))?;

    let story = state
        .repo
        .related(&featured, "story")
        .await?
        .ok_or_else(|| ApiError::not_found("no_story", "No story linked to the featured story"))?;

    let author = state.repo.related(&story, "author").await?;
    let categories = state.repo.post_terms(story.id, Taxonomy::Categories).await?;
    Ok(Json(StorySummary::new(&story, author.as_ref(), &categories)))
}

/// GET /story-champion/latest
pub async fn latest_story_champion(
    State(state): State<AppState>,
) -> ApiResult<Json<StoryChampion>> {
    let champion = state
        .repo
        .latest(PostType::StoryChampion)
        .await?
        .ok_or_else(|| ApiError::not_found("no_story_champion", "No story champion found"))?;

    let author = state.repo.related(&champion, "author").await?;
    let story = state.repo.related(&champion, "story").await?;
    Ok(Json(StoryChampion::new(&champion, author.as_ref(), story.as_ref())))
}
