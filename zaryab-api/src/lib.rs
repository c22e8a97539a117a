//! zaryab-api library - Content REST API
//!
//! Read-mostly JSON endpoints over the CMS content store: articles, stories,
//! episodes, poems, podcasts, letters, reviews, books, authors and their
//! taxonomies, plus the newsletter subscription write path.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use zaryab_common::config::ApiConfig;

pub mod adjacency;
pub mod api;
pub mod error;
pub mod pagination;
pub mod projection;
pub mod repository;

use pagination::{ListParams, PageRequest};
use repository::ContentRepository;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Content store
    pub repo: Arc<dyn ContentRepository>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(repo: Arc<dyn ContentRepository>, config: ApiConfig) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }

    /// Page selection using the configured default and cap
    pub fn page_request(&self, params: &ListParams) -> PageRequest {
        params.page_request(self.config.default_per_page, self.config.max_per_page)
    }
}

/// Content routes, relative to the configured prefix
fn content_routes(config: &ApiConfig) -> Router<AppState> {
    use axum::extract::State;
    use axum::routing::{get, post};

    let mut router = Router::new()
        .route("/about-us", get(api::get_about_us))
        .route("/articles", get(api::list_articles))
        .route("/articles/similar/:slug", get(api::similar_articles))
        .route("/articles/:slug", get(api::get_article))
        .route("/author-reviews", get(api::list_reviews))
        .route("/author-reviews/similar/:slug", get(api::similar_reviews))
        .route("/author-reviews/:slug", get(api::get_review))
        .route("/authors-archive", get(api::list_authors_archive))
        .route("/authors-archive/:slug", get(api::get_author_archive))
        .route("/authors", get(api::list_authors))
        .route("/authors/:slug", get(api::get_author))
        .route("/books/featured", get(api::featured_book))
        .route("/books/:slug", get(api::get_book))
        .route("/categories", get(api::list_categories))
        .route("/episodes/:slug", get(api::get_episode))
        .route("/featured-story", get(api::featured_story))
        .route("/story-champion/latest", get(api::latest_story_champion))
        .route("/global-search", get(api::global_search))
        .route("/letters", get(api::list_letters))
        .route("/letters/:slug", get(api::get_letter))
        .route("/newsletter", post(api::subscribe))
        .route("/podcasts", get(api::list_podcasts))
        .route("/podcasts/:slug", get(api::get_podcast))
        .route("/poems", get(api::list_poems))
        .route("/poems/:slug", get(api::get_poem))
        .route("/stories", get(api::list_stories))
        .route("/stories/similar/:slug", get(api::similar_stories))
        .route("/stories/collection/:slug", get(api::stories_in_collection))
        .route("/stories/:slug", get(api::get_story));

    for taxonomy in config.taxonomy_routes.iter().copied() {
        router = router.route(
            &format!("/{}", taxonomy),
            get(move |State(state): State<AppState>| api::list_taxonomy_terms(state, taxonomy)),
        );
    }

    router
}

/// Build application router
///
/// Content routes live under `api_prefix`; `/health` and `/buildinfo` stay at
/// the root.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let content = content_routes(&state.config);
    let routes = if state.config.api_prefix.is_empty() {
        Router::new().merge(content)
    } else {
        Router::new().nest(&state.config.api_prefix, content)
    };

    let cors = if state.config.cors_allow_any {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    routes
        .route("/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
