//! Author archive endpoints (`/authors-archive`)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use zaryab_common::db::PostType;

use super::find_or_404;
use crate::error::ApiResult;
use crate::pagination::{ListParams, Paginated};
use crate::projection::{AuthorArchiveDetail, AuthorArchiveSummary};
use crate::repository::{ContentQuery, Direction, SortKey};
use crate::AppState;

/// GET /authors-archive
///
/// Newest first.
pub async fn list_authors_archive(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<AuthorArchiveSummary>>> {
    let page = state.page_request(&params);
    let query = ContentQuery::new(PostType::AuthorArchive)
        .ordered_by(SortKey::PublishedAt, Direction::Desc)
        .paged(page);
    let result = state.repo.query(&query).await?;

    let data = result.items.iter().map(AuthorArchiveSummary::new).collect();
    Ok(Json(Paginated::new(data, result.total, page)))
}

/// GET /authors-archive/{slug}
pub async fn get_author_archive(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<AuthorArchiveDetail>> {
    let item = find_or_404(
        &state,
        PostType::AuthorArchive,
        &slug,
        "no_author",
        "No author archive found with the provided slug",
    )
    .await?;
    Ok(Json(AuthorArchiveDetail::new(&item)))
}
