//! Book endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use zaryab_common::db::{PostType, Taxonomy};

use super::find_or_404;
use crate::error::{ApiError, ApiResult};
use crate::projection::{BookDetail, BookFeatured};
use crate::AppState;

/// GET /books/featured
///
/// The most recently published book.
pub async fn featured_book(State(state): State<AppState>) -> ApiResult<Json<BookFeatured>> {
    let book = state
        .repo
        .latest(PostType::Book)
        .await?
        .ok_or_else(|| ApiError::not_found("no_book", "No book found"))?;
    Ok(Json(BookFeatured::new(&book)))
}

/// GET /books/{slug}
pub async fn get_book(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<BookDetail>> {
    let book = find_or_404(
        &state,
        PostType::Book,
        &slug,
        "no_book",
        "No book found with the provided slug",
    )
    .await?;

    let author = state.repo.related(&book, "author").await?;
    let categories = state.repo.post_terms(book.id, Taxonomy::Categories).await?;
    Ok(Json(BookDetail::new(&book, author.as_ref(), &categories)))
}
