//! SQLite-backed content repository
//!
//! Custom field values are JSON documents in `post_meta.meta_value`. Filters
//! and ordering read them through `json_extract`, so a relation stored as a
//! bare id, a numeric string, an object with `ID`/`id` or an array of any of
//! those compares the same way.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use zaryab_common::db::{ContentItem, PostType, Taxonomy, Term};
use zaryab_common::{Error, Result};

use super::{
    Compare, ContentQuery, ContentRepository, Direction, QueryResult, SortKey, TaxOperator,
};

const POST_COLUMNS: &str =
    "p.id, p.post_type, p.slug, p.title, p.excerpt, p.content, p.featured_image, p.published_at";

/// Numeric view of a custom field value; non-JSON text is cast directly
const META_NUMBER: &str = "(CASE WHEN json_valid(m.meta_value) THEN CAST(COALESCE(\
    json_extract(m.meta_value, '$.ID'), \
    json_extract(m.meta_value, '$.id'), \
    json_extract(m.meta_value, '$[0].ID'), \
    json_extract(m.meta_value, '$[0].id'), \
    json_extract(m.meta_value, '$[0]'), \
    json_extract(m.meta_value, '$')) AS INTEGER) \
    ELSE CAST(m.meta_value AS INTEGER) END)";

const TERM_COUNT: &str = "(SELECT COUNT(*) FROM term_relationships r \
    JOIN posts rp ON rp.id = r.post_id \
    WHERE r.term_id = t.id AND rp.status = 'publish')";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    post_type: String,
    slug: String,
    title: String,
    excerpt: String,
    content: String,
    featured_image: Option<String>,
    published_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct MetaRow {
    post_id: i64,
    meta_key: String,
    meta_value: String,
}

#[derive(sqlx::FromRow)]
struct TermRow {
    id: i64,
    taxonomy: String,
    name: String,
    slug: String,
    count: i64,
}

impl TryFrom<TermRow> for Term {
    type Error = Error;

    fn try_from(row: TermRow) -> Result<Self> {
        Ok(Term {
            id: row.id,
            taxonomy: row.taxonomy.parse()?,
            name: row.name,
            slug: row.slug,
            count: row.count,
        })
    }
}

/// Repository over the schema created by `zaryab_common::db::init`
#[derive(Clone)]
pub struct SqliteContentRepository {
    pool: SqlitePool,
}

impl SqliteContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attach custom fields to fetched rows, preserving row order
    async fn hydrate(&self, rows: Vec<PostRow>) -> Result<Vec<ContentItem>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT post_id, meta_key, meta_value FROM post_meta WHERE post_id IN (");
        let mut ids = qb.separated(", ");
        for row in &rows {
            ids.push_bind(row.id);
        }
        ids.push_unseparated(")");

        let meta: Vec<MetaRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        let mut fields: BTreeMap<i64, BTreeMap<String, Value>> = BTreeMap::new();
        for m in meta {
            // Values written outside the API may be plain text rather than JSON
            let value = serde_json::from_str(&m.meta_value)
                .unwrap_or_else(|_| Value::String(m.meta_value.clone()));
            fields.entry(m.post_id).or_default().insert(m.meta_key, value);
        }

        rows.into_iter()
            .map(|row| {
                Ok(ContentItem {
                    id: row.id,
                    post_type: row.post_type.parse::<PostType>()?,
                    slug: row.slug,
                    title: row.title,
                    excerpt: row.excerpt,
                    content: row.content,
                    featured_image: row.featured_image.filter(|url| !url.is_empty()),
                    published_at: row.published_at,
                    fields: fields.remove(&row.id).unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn fetch_one_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) -> Result<Option<ContentItem>> {
        let row: Option<PostRow> = qb.build_query_as().fetch_optional(&self.pool).await?;
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }
}

/// Append the FROM/WHERE clauses shared by the count and page queries
fn push_filters<'a>(qb: &mut QueryBuilder<'a, Sqlite>, query: &'a ContentQuery) {
    qb.push(" FROM posts p WHERE p.status = 'publish' AND p.post_type = ");
    qb.push_bind(query.post_type.as_str());

    if !query.exclude_ids.is_empty() {
        qb.push(" AND p.id NOT IN (");
        let mut ids = qb.separated(", ");
        for id in &query.exclude_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
    }

    for filter in &query.tax_filters {
        qb.push(match filter.operator {
            TaxOperator::In => " AND EXISTS (",
            TaxOperator::NotIn => " AND NOT EXISTS (",
        });
        qb.push(
            "SELECT 1 FROM term_relationships tr JOIN terms t ON t.id = tr.term_id \
             WHERE tr.post_id = p.id AND t.taxonomy = ",
        );
        qb.push_bind(filter.taxonomy.as_str());
        qb.push(" AND t.slug IN (");
        let mut slugs = qb.separated(", ");
        for slug in &filter.slugs {
            slugs.push_bind(slug.as_str());
        }
        slugs.push_unseparated("))");
    }

    for filter in &query.meta_filters {
        qb.push(" AND EXISTS (SELECT 1 FROM post_meta m WHERE m.post_id = p.id AND m.meta_key = ");
        qb.push_bind(filter.key.as_str());
        qb.push(" AND ");
        qb.push(META_NUMBER);
        qb.push(" ");
        qb.push(filter.compare.as_sql());
        qb.push(" ");
        qb.push_bind(filter.value);
        qb.push(")");
    }

    if let SortKey::MetaNumber(key) = &query.order.key {
        qb.push(" AND EXISTS (SELECT 1 FROM post_meta m WHERE m.post_id = p.id AND m.meta_key = ");
        qb.push_bind(key.as_str());
        qb.push(")");
    }

    if let Some(keyword) = &query.keyword {
        let pattern = format!("%{}%", escape_like(keyword));
        qb.push(" AND (");
        for (i, column) in ["p.title", "p.excerpt", "p.content"].iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(*column);
            qb.push(" LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" ESCAPE '\\'");
        }
        qb.push(")");
    }
}

fn push_order<'a>(qb: &mut QueryBuilder<'a, Sqlite>, query: &'a ContentQuery) {
    let direction = match query.order.direction {
        Direction::Asc => "ASC",
        Direction::Desc => "DESC",
    };

    match &query.order.key {
        SortKey::PublishedAt => {
            qb.push(format!(" ORDER BY p.published_at {0}, p.id {0}", direction));
        }
        SortKey::MetaNumber(key) => {
            qb.push(" ORDER BY (SELECT ");
            qb.push(META_NUMBER);
            qb.push(" FROM post_meta m WHERE m.post_id = p.id AND m.meta_key = ");
            qb.push_bind(key.as_str());
            qb.push(format!(") {}, p.id ASC", direction));
        }
    }
}

/// Escape LIKE wildcards so the keyword matches literally
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ContentRepository for SqliteContentRepository {
    async fn query(&self, query: &ContentQuery) -> Result<QueryResult> {
        let mut count_qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*)");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
        qb.push(POST_COLUMNS);
        push_filters(&mut qb, query);
        push_order(&mut qb, query);
        if let Some(page) = query.page {
            qb.push(" LIMIT ");
            qb.push_bind(page.per_page);
            qb.push(" OFFSET ");
            qb.push_bind(page.offset());
        }

        debug!("content query: {}", qb.sql());
        let rows: Vec<PostRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        let items = self.hydrate(rows).await?;

        Ok(QueryResult { items, total })
    }

    async fn find_by_slug(&self, post_type: PostType, slug: &str) -> Result<Option<ContentItem>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
        qb.push(POST_COLUMNS);
        qb.push(" FROM posts p WHERE p.status = 'publish' AND p.post_type = ");
        qb.push_bind(post_type.as_str());
        qb.push(" AND p.slug = ");
        qb.push_bind(slug);
        self.fetch_one_where(&mut qb).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ContentItem>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
        qb.push(POST_COLUMNS);
        qb.push(" FROM posts p WHERE p.status = 'publish' AND p.id = ");
        qb.push_bind(id);
        self.fetch_one_where(&mut qb).await
    }

    async fn post_terms(&self, post_id: i64, taxonomy: Taxonomy) -> Result<Vec<Term>> {
        let sql = format!(
            "SELECT t.id, t.taxonomy, t.name, t.slug, {} AS count \
             FROM terms t JOIN term_relationships tr ON tr.term_id = t.id \
             WHERE tr.post_id = ? AND t.taxonomy = ? \
             ORDER BY tr.term_order ASC, t.id ASC",
            TERM_COUNT
        );
        let rows: Vec<TermRow> = sqlx::query_as(&sql)
            .bind(post_id)
            .bind(taxonomy.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Term::try_from).collect()
    }

    async fn taxonomy_terms(&self, taxonomy: Taxonomy) -> Result<Vec<Term>> {
        let sql = format!(
            "SELECT t.id, t.taxonomy, t.name, t.slug, {} AS count \
             FROM terms t WHERE t.taxonomy = ? ORDER BY t.name ASC, t.id ASC",
            TERM_COUNT
        );
        let rows: Vec<TermRow> = sqlx::query_as(&sql)
            .bind(taxonomy.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Term::try_from).collect()
    }

    async fn find_term(&self, taxonomy: Taxonomy, slug: &str) -> Result<Option<Term>> {
        let sql = format!(
            "SELECT t.id, t.taxonomy, t.name, t.slug, {} AS count \
             FROM terms t WHERE t.taxonomy = ? AND t.slug = ?",
            TERM_COUNT
        );
        let row: Option<TermRow> = sqlx::query_as(&sql)
            .bind(taxonomy.as_str())
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Term::try_from).transpose()
    }

    async fn subscriber_exists(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM newsletter_subscribers WHERE email = ?)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn add_subscriber(&self, email: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO newsletter_subscribers (email) VALUES (?)")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }
}
