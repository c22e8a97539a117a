//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use zaryab_common::db::PostType;

use super::find_or_404;
use crate::error::ApiResult;
use crate::pagination::{ListParams, Paginated};
use crate::projection::{AuthorDetail, AuthorSummary};
use crate::repository::ContentQuery;
use crate::AppState;

/// GET /authors
pub async fn list_authors(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<AuthorSummary>>> {
    let page = state.page_request(&params);
    let result = state
        .repo
        .query(&ContentQuery::new(PostType::Author).paged(page))
        .await?;

    let data = result.items.iter().map(AuthorSummary::new).collect();
    Ok(Json(Paginated::new(data, result.total, page)))
}

/// GET /authors/{slug}
pub async fn get_author(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<AuthorDetail>> {
    let author = find_or_404(
        &state,
        PostType::Author,
        &slug,
        "no_author",
        "No author found with the provided slug",
    )
    .await?;
    Ok(Json(AuthorDetail::new(&author)))
}
