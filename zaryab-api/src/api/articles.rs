//! Article endpoints
//!
//! `/articles`, `/articles/{slug}` and `/articles/similar/{slug}`. Author
//! reviews share the same projections, so the assembly helpers here are reused
//! by [`super::reviews`].

use axum::{
    extract::{Path, Query, State},
    Json,
};
use zaryab_common::db::{ContentItem, PostType, Taxonomy};

use super::find_or_404;
use crate::error::ApiResult;
use crate::pagination::{ListParams, PageRequest, Paginated};
use crate::projection::{EditorialDetail, EditorialSummary};
use crate::repository::ContentQuery;
use crate::AppState;

const NO_ARTICLE: &str = "No article found with the provided slug";

/// Project list entries, resolving each author and category set
pub(crate) async fn editorial_summaries(
    state: &AppState,
    items: &[ContentItem],
) -> ApiResult<Vec<EditorialSummary>> {
    let mut data = Vec::with_capacity(items.len());
    for item in items {
        let author = state.repo.related(item, "author").await?;
        let categories = state.repo.post_terms(item.id, Taxonomy::Categories).await?;
        data.push(EditorialSummary::new(item, author.as_ref(), &categories));
    }
    Ok(data)
}

pub(crate) async fn editorial_detail(
    state: &AppState,
    item: &ContentItem,
) -> ApiResult<EditorialDetail> {
    let author = state.repo.related(item, "author").await?;
    let categories = state.repo.post_terms(item.id, Taxonomy::Categories).await?;
    Ok(EditorialDetail::new(item, author.as_ref(), &categories))
}

/// One page of a type's items, optionally excluding one
pub(crate) async fn editorial_page(
    state: &AppState,
    post_type: PostType,
    page: PageRequest,
    exclude: Option<i64>,
) -> ApiResult<Paginated<EditorialSummary>> {
    let mut query = ContentQuery::new(post_type).paged(page);
    if let Some(id) = exclude {
        query = query.excluding(id);
    }

    let result = state.repo.query(&query).await?;
    let data = editorial_summaries(state, &result.items).await?;
    Ok(Paginated::new(data, result.total, page))
}

/// GET /articles
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<EditorialSummary>>> {
    let page = state.page_request(&params);
    Ok(Json(editorial_page(&state, PostType::Article, page, None).await?))
}

/// GET /articles/similar/{slug}
///
/// Every other article, paginated.
pub async fn similar_articles(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Paginated<EditorialSummary>>> {
    let article = find_or_404(&state, PostType::Article, &slug, "no_article", NO_ARTICLE).await?;
    let page = state.page_request(&params);
    Ok(Json(
        editorial_page(&state, PostType::Article, page, Some(article.id)).await?,
    ))
}

/// GET /articles/{slug}
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<EditorialDetail>> {
    let article = find_or_404(&state, PostType::Article, &slug, "no_article", NO_ARTICLE).await?;
    Ok(Json(editorial_detail(&state, &article).await?))
}
