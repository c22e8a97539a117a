//! Shared fixtures for zaryab-api integration tests
//!
//! Each test builds its own in-memory content store and seeds it with raw SQL,
//! the way the CMS itself would have written the rows.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use zaryab_api::repository::SqliteContentRepository;
use zaryab_api::{build_router, AppState};
use zaryab_common::config::ApiConfig;
use zaryab_common::db::init_memory_database;

/// Fresh in-memory store with the full schema
pub async fn setup_db() -> SqlitePool {
    init_memory_database()
        .await
        .expect("Should create in-memory database")
}

/// Router over `pool` with default configuration
pub fn setup_app(pool: SqlitePool) -> Router {
    setup_app_with(pool, ApiConfig::default())
}

pub fn setup_app_with(pool: SqlitePool, config: ApiConfig) -> Router {
    let repo = Arc::new(SqliteContentRepository::new(pool));
    build_router(AppState::new(repo, config))
}

/// GET request under the default prefix
pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/wp-json/v1{}", path))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/wp-json/v1{}", path))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_form(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/wp-json/v1{}", path))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Extract JSON body from response
pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Insert a published post; `published_at` is `YYYY-MM-DD HH:MM:SS`
pub async fn add_post(
    pool: &SqlitePool,
    post_type: &str,
    slug: &str,
    title: &str,
    published_at: &str,
) -> i64 {
    sqlx::query(
        "INSERT INTO posts (post_type, slug, title, content, published_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(post_type)
    .bind(slug)
    .bind(title)
    .bind(format!("Body of {}", title))
    .bind(published_at)
    .execute(pool)
    .await
    .expect("Should insert post")
    .last_insert_rowid()
}

/// Insert an unpublished post
pub async fn add_draft(pool: &SqlitePool, post_type: &str, slug: &str) -> i64 {
    sqlx::query("INSERT INTO posts (post_type, slug, title, status) VALUES (?, ?, ?, 'draft')")
        .bind(post_type)
        .bind(slug)
        .bind(slug)
        .execute(pool)
        .await
        .expect("Should insert draft")
        .last_insert_rowid()
}

pub async fn set_body(pool: &SqlitePool, post_id: i64, content: &str, excerpt: &str) {
    sqlx::query("UPDATE posts SET content = ?, excerpt = ? WHERE id = ?")
        .bind(content)
        .bind(excerpt)
        .bind(post_id)
        .execute(pool)
        .await
        .expect("Should update post body");
}

pub async fn set_image(pool: &SqlitePool, post_id: i64, url: &str) {
    sqlx::query("UPDATE posts SET featured_image = ? WHERE id = ?")
        .bind(url)
        .bind(post_id)
        .execute(pool)
        .await
        .expect("Should set featured image");
}

/// Store a custom field as a JSON document
pub async fn set_meta(pool: &SqlitePool, post_id: i64, key: &str, value: Value) {
    sqlx::query("INSERT OR REPLACE INTO post_meta (post_id, meta_key, meta_value) VALUES (?, ?, ?)")
        .bind(post_id)
        .bind(key)
        .bind(value.to_string())
        .execute(pool)
        .await
        .expect("Should insert meta");
}

pub async fn add_term(pool: &SqlitePool, taxonomy: &str, name: &str, slug: &str) -> i64 {
    sqlx::query("INSERT INTO terms (taxonomy, name, slug) VALUES (?, ?, ?)")
        .bind(taxonomy)
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await
        .expect("Should insert term")
        .last_insert_rowid()
}

pub async fn attach_term(pool: &SqlitePool, post_id: i64, term_id: i64, order: i64) {
    sqlx::query("INSERT INTO term_relationships (post_id, term_id, term_order) VALUES (?, ?, ?)")
        .bind(post_id)
        .bind(term_id)
        .bind(order)
        .execute(pool)
        .await
        .expect("Should attach term");
}

pub async fn subscriber_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers")
        .fetch_one(pool)
        .await
        .expect("Should count subscribers")
}

/// `2024-01-DD 10:00:00`, for ordering by day
pub fn day(d: u32) -> String {
    format!("2024-01-{:02} 10:00:00", d)
}
