//! Author review endpoints (`/author-reviews`)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use zaryab_common::db::PostType;

use super::articles::{editorial_detail, editorial_page};
use super::find_or_404;
use crate::error::ApiResult;
use crate::pagination::{ListParams, Paginated};
use crate::projection::{EditorialDetail, EditorialSummary};
use crate::AppState;

const NO_REVIEW: &str = "No review found with the provided slug";

/// GET /author-reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<EditorialSummary>>> {
    let page = state.page_request(&params);
    Ok(Json(editorial_page(&state, PostType::Review, page, None).await?))
}

/// GET /author-reviews/similar/{slug}
pub async fn similar_reviews(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<EditorialSummary>>> {
    let review = find_or_404(&state, PostType::Review, &slug, "no_review", NO_REVIEW).await?;
    let page = state.page_request(&params);
    Ok(Json(
        editorial_page(&state, PostType::Review, page, Some(review.id)).await?,
    ))
}

/// GET /author-reviews/{slug}
pub async fn get_review(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<EditorialDetail>> {
    let review = find_or_404(&state, PostType::Review, &slug, "no_review", NO_REVIEW).await?;
    Ok(Json(editorial_detail(&state, &review).await?))
}
