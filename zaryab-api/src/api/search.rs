//! Global search across content types

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zaryab_common::db::Taxonomy;

use super::split_slugs;
use crate::error::ApiResult;
use crate::projection::SearchHit;
use crate::repository::{ContentQuery, TaxFilter};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
    /// Comma-separated `categories` slugs
    pub categories: Option<String>,
}

/// Matches for one content type
#[derive(Debug, Serialize)]
pub struct SearchGroup {
    pub count: i64,
    pub posts: Vec<SearchHit>,
}

/// GET /global-search
///
/// One unpaginated query per configured type. The response is keyed by the
/// stored type name.
pub async fn global_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<BTreeMap<String, SearchGroup>>> {
    let keyword = params.keyword.unwrap_or_default();
    let categories = split_slugs(params.categories.as_deref());
    debug!("Global search: keyword={:?} categories={:?}", keyword, categories);

    let mut groups = BTreeMap::new();
    for post_type in &state.config.search_post_types {
        let query = ContentQuery::new(*post_type)
            .matching(&keyword)
            .with_tax(TaxFilter::any_of(Taxonomy::Categories, categories.clone()));
        let result = state.repo.query(&query).await?;

        groups.insert(
            post_type.as_str().to_string(),
            SearchGroup {
                count: result.total,
                posts: result.items.iter().map(SearchHit::from).collect(),
            },
        );
    }

    Ok(Json(groups))
}
