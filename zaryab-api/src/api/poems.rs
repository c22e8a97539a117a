//! Poem endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use zaryab_common::db::{PostType, Taxonomy};

use super::{find_or_404, split_slugs};
use crate::error::ApiResult;
use crate::pagination::{ListParams, Paginated};
use crate::projection::{PoemDetail, PoemSummary};
use crate::repository::{ContentQuery, TaxFilter};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PoemParams {
    #[serde(flatten)]
    pub list: ListParams,
    /// Comma-separated `poem_type` slugs
    pub poem_type: Option<String>,
}

/// GET /poems
pub async fn list_poems(
    State(state): State<AppState>,
    Query(params): Query<PoemParams>,
) -> ApiResult<Json<Paginated<PoemSummary>>> {
    let page = state.page_request(&params.list);
    let query = ContentQuery::new(PostType::Poem)
        .with_tax(TaxFilter::any_of(
            Taxonomy::PoemType,
            split_slugs(params.poem_type.as_deref()),
        ))
        .paged(page);
    let result = state.repo.query(&query).await?;

    let mut data = Vec::with_capacity(result.items.len());
    for poem in &result.items {
        let author = state.repo.related(poem, "author").await?;
        let poem_types = state.repo.post_terms(poem.id, Taxonomy::PoemType).await?;
        data.push(PoemSummary::new(poem, author.as_ref(), &poem_types));
    }
    Ok(Json(Paginated::new(data, result.total, page)))
}

/// GET /poems/{slug}
pub async fn get_poem(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PoemDetail>> {
    let poem = find_or_404(
        &state,
        PostType::Poem,
        &slug,
        "no_poem",
        "No poem found with the provided slug",
    )
    .await?;

    let author = state.repo.related(&poem, "author").await?;
    let poem_types = state.repo.post_terms(poem.id, Taxonomy::PoemType).await?;
    Ok(Json(PoemDetail::new(&poem, author.as_ref(), &poem_types)))
}
