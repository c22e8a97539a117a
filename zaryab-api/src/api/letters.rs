//! Letter endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use zaryab_common::db::{PostType, Taxonomy};

use super::{find_or_404, split_slugs};
use crate::error::ApiResult;
use crate::pagination::{ListParams, Paginated};
use crate::projection::{LetterDetail, LetterSummary};
use crate::repository::{ContentQuery, TaxFilter};
use crate::AppState;

/// `letter_type` term marking archived letters
pub const ARCHIVE_SLUG: &str = "archive";

/// Archive filter selected by the `type` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterScope {
    All,
    Archive,
    NonArchive,
}

impl LetterScope {
    /// Unknown values behave like `all`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("archive") => LetterScope::Archive,
            Some("non-archive") => LetterScope::NonArchive,
            _ => LetterScope::All,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LetterParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(rename = "type")]
    pub scope: Option<String>,
    pub letter_type: Option<String>,
}

/// Letters query for the given filters; filters combine with AND
pub fn letters_query(scope: LetterScope, letter_types: Vec<String>) -> ContentQuery {
    let archive = vec![ARCHIVE_SLUG.to_string()];
    let query = match scope {
        LetterScope::All => ContentQuery::new(PostType::Letter),
        LetterScope::Archive => ContentQuery::new(PostType::Letter)
            .with_tax(TaxFilter::any_of(Taxonomy::LetterType, archive)),
        LetterScope::NonArchive => ContentQuery::new(PostType::Letter)
            .with_tax(TaxFilter::none_of(Taxonomy::LetterType, archive)),
    };
    query.with_tax(TaxFilter::any_of(Taxonomy::LetterType, letter_types))
}

/// GET /letters
pub async fn list_letters(
    State(state): State<AppState>,
    Query(params): Query<LetterParams>,
) -> ApiResult<Json<Paginated<LetterSummary>>> {
    let page = state.page_request(&params.list);
    let query = letters_query(
        LetterScope::parse(params.scope.as_deref()),
        split_slugs(params.letter_type.as_deref()),
    )
    .paged(page);

    let result = state.repo.query(&query).await?;
    let data = result.items.iter().map(LetterSummary::new).collect();
    Ok(Json(Paginated::new(data, result.total, page)))
}

/// GET /letters/{slug}
pub async fn get_letter(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<LetterDetail>> {
    let letter = find_or_404(
        &state,
        PostType::Letter,
        &slug,
        "no_letter",
        "No letter found with the provided slug",
    )
    .await?;
    Ok(Json(LetterDetail::new(&letter)))
}
