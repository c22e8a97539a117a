//! Taxonomy term listings
//!
//! `/categories` plus one route per configured taxonomy. Unused terms are
//! listed too, with a zero count.

use axum::{extract::State, Json};
use zaryab_common::db::Taxonomy;

use crate::error::{ApiError, ApiResult};
use crate::projection::TermWithCount;
use crate::AppState;

async fn term_listing(state: &AppState, taxonomy: Taxonomy) -> ApiResult<Vec<TermWithCount>> {
    let terms = state.repo.taxonomy_terms(taxonomy).await?;
    Ok(terms.iter().map(TermWithCount::from).collect())
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<TermWithCount>>> {
    let terms = term_listing(&state, Taxonomy::Categories).await?;
    if terms.is_empty() {
        return Err(ApiError::not_found("no_categories", "No categories found"));
    }
    Ok(Json(terms))
}

/// GET /{taxonomy}
///
/// Mounted once per configured taxonomy; the router captures which one.
pub async fn list_taxonomy_terms(
    state: AppState,
    taxonomy: Taxonomy,
) -> ApiResult<Json<Vec<TermWithCount>>> {
    let terms = term_listing(&state, taxonomy).await?;
    if terms.is_empty() {
        return Err(ApiError::not_found(
            "no_terms",
            format!("No terms found in {}", taxonomy),
        ));
    }
    Ok(Json(terms))
}
