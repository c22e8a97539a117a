//! Podcast endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use zaryab_common::db::{PostType, Taxonomy};

use super::find_or_404;
use crate::error::ApiResult;
use crate::pagination::{ListParams, Paginated};
use crate::projection::{PodcastDetail, PodcastSummary};
use crate::repository::ContentQuery;
use crate::AppState;

/// GET /podcasts
///
/// Pages default to `podcast_per_page` items rather than the global default.
pub async fn list_podcasts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<PodcastSummary>>> {
    let page = params.page_request(state.config.podcast_per_page, state.config.max_per_page);
    let result = state
        .repo
        .query(&ContentQuery::new(PostType::Podcast).paged(page))
        .await?;

    let data = result.items.iter().map(PodcastSummary::new).collect();
    Ok(Json(Paginated::new(data, result.total, page)))
}

/// GET /podcasts/{slug}
pub async fn get_podcast(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PodcastDetail>> {
    let podcast = find_or_404(
        &state,
        PostType::Podcast,
        &slug,
        "no_podcast",
        "No podcast found with the provided slug",
    )
    .await?;

    let categories = state.repo.post_terms(podcast.id, Taxonomy::Categories).await?;
    Ok(Json(PodcastDetail::new(&podcast, &categories)))
}
