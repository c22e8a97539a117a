//! Content repository interface
//!
//! Handlers never touch storage directly: they describe what they need as a
//! [`ContentQuery`] and hand it to a [`ContentRepository`]. The SQLite
//! implementation lives in [`sqlite`].

use async_trait::async_trait;
use zaryab_common::db::{ContentItem, PostType, Relation, Taxonomy, Term};
use zaryab_common::Result;

use crate::pagination::PageRequest;

pub mod sqlite;

pub use sqlite::SqliteContentRepository;

/// Taxonomy membership test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxOperator {
    /// Item carries at least one of the slugs
    In,
    /// Item carries none of the slugs
    NotIn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxFilter {
    pub taxonomy: Taxonomy,
    pub slugs: Vec<String>,
    pub operator: TaxOperator,
}

impl TaxFilter {
    pub fn any_of(taxonomy: Taxonomy, slugs: Vec<String>) -> Self {
        Self { taxonomy, slugs, operator: TaxOperator::In }
    }

    pub fn none_of(taxonomy: Taxonomy, slugs: Vec<String>) -> Self {
        Self { taxonomy, slugs, operator: TaxOperator::NotIn }
    }
}

/// Numeric comparison against a custom field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compare {
    Eq,
    Lt,
    Gt,
}

impl Compare {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Compare::Eq => "=",
            Compare::Lt => "<",
            Compare::Gt => ">",
        }
    }
}

/// Custom field filter; relation fields compare by referenced id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaFilter {
    pub key: String,
    pub compare: Compare,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    PublishedAt,
    /// Numeric custom field; items without the field are excluded
    MetaNumber(String),
}

/// Result order
///
/// Ties break on post id: in the same direction for publication order,
/// ascending for custom-field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub key: SortKey,
    pub direction: Direction,
}

impl Default for Ordering {
    fn default() -> Self {
        Self { key: SortKey::PublishedAt, direction: Direction::Desc }
    }
}

/// Declarative description of one repository query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub post_type: PostType,
    /// `None` returns every match
    pub page: Option<PageRequest>,
    pub exclude_ids: Vec<i64>,
    pub tax_filters: Vec<TaxFilter>,
    pub meta_filters: Vec<MetaFilter>,
    /// Exact phrase matched against title, excerpt and content
    pub keyword: Option<String>,
    pub order: Ordering,
}

impl ContentQuery {
    pub fn new(post_type: PostType) -> Self {
        Self {
            post_type,
            page: None,
            exclude_ids: Vec::new(),
            tax_filters: Vec::new(),
            meta_filters: Vec::new(),
            keyword: None,
            order: Ordering::default(),
        }
    }

    pub fn paged(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    pub fn excluding(mut self, id: i64) -> Self {
        self.exclude_ids.push(id);
        self
    }

    /// Add a taxonomy filter; filters with no slugs are ignored
    pub fn with_tax(mut self, filter: TaxFilter) -> Self {
        if !filter.slugs.is_empty() {
            self.tax_filters.push(filter);
        }
        self
    }

    pub fn with_meta(mut self, key: &str, compare: Compare, value: i64) -> Self {
        self.meta_filters.push(MetaFilter { key: key.to_string(), compare, value });
        self
    }

    /// Restrict to an exact phrase; blank keywords are ignored
    pub fn matching(mut self, keyword: &str) -> Self {
        let keyword = keyword.trim();
        if !keyword.is_empty() {
            self.keyword = Some(keyword.to_string());
        }
        self
    }

    pub fn ordered_by(mut self, key: SortKey, direction: Direction) -> Self {
        self.order = Ordering { key, direction };
        self
    }
}

/// One page of matches plus the unpaginated total
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub items: Vec<ContentItem>,
    pub total: i64,
}

/// Read access to published content, plus the newsletter subscriber list
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Run a filtered, ordered, optionally paginated query
    async fn query(&self, query: &ContentQuery) -> Result<QueryResult>;

    async fn find_by_slug(&self, post_type: PostType, slug: &str) -> Result<Option<ContentItem>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ContentItem>>;

    /// Terms of `taxonomy` attached to a post, in assignment order
    async fn post_terms(&self, post_id: i64, taxonomy: Taxonomy) -> Result<Vec<Term>>;

    /// Every term of a taxonomy, including unused ones, by name
    async fn taxonomy_terms(&self, taxonomy: Taxonomy) -> Result<Vec<Term>>;

    async fn find_term(&self, taxonomy: Taxonomy, slug: &str) -> Result<Option<Term>>;

    async fn subscriber_exists(&self, email: &str) -> Result<bool>;

    /// Insert a subscriber, returning its id
    async fn add_subscriber(&self, email: &str) -> Result<i64>;

    /// Most recently published item of a type
    async fn latest(&self, post_type: PostType) -> Result<Option<ContentItem>> {
        let query = ContentQuery::new(post_type).paged(PageRequest { page: 1, per_page: 1 });
        Ok(self.query(&query).await?.items.into_iter().next())
    }

    /// Follow a relation field; dangling references resolve to `None`
    async fn related(&self, item: &ContentItem, key: &str) -> Result<Option<ContentItem>> {
        match item.relation(key) {
            Relation::Id(id) => self.find_by_id(id).await,
            Relation::None => Ok(None),
        }
    }
}
