//! Pagination utilities
//!
//! List endpoints accept `page` and `per_page` query parameters and answer with
//! a `{data, meta}` envelope whose meta reports the unpaginated total.

use serde::{Deserialize, Serialize};

/// Sanitized page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Current page number (1-indexed)
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Offset for SQL LIMIT/OFFSET query
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Resolve requested page/per_page against defaults
///
/// Absent, zero or negative values fall back to `1` and `default_per_page`.
/// `per_page` is capped at `max_per_page` unless that is 0.
///
/// # Examples
/// ```
/// use zaryab_api::pagination::paginate;
///
/// let p = paginate(None, Some(0), 10, 100);
/// assert_eq!((p.page, p.per_page), (1, 10));
///
/// let p = paginate(Some(3), Some(500), 10, 100);
/// assert_eq!((p.page, p.per_page), (3, 100));
/// ```
pub fn paginate(
    requested_page: Option<i64>,
    requested_per_page: Option<i64>,
    default_per_page: i64,
    max_per_page: i64,
) -> PageRequest {
    let page = requested_page.filter(|p| *p > 0).unwrap_or(1);
    let mut per_page = requested_per_page
        .filter(|p| *p > 0)
        .unwrap_or(default_per_page)
        .max(1);
    if max_per_page > 0 {
        per_page = per_page.min(max_per_page);
    }

    PageRequest { page, per_page }
}

/// Number of pages needed for `total` items
pub fn page_count(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 || total <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// Parse a numeric query parameter leniently; anything unparsable is absent
pub fn parse_param(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Raw pagination query parameters
///
/// Kept as strings so that `?page=abc` degrades to the default rather than
/// failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ListParams {
    pub fn page_request(&self, default_per_page: i64, max_per_page: i64) -> PageRequest {
        paginate(
            parse_param(self.page.as_deref()),
            parse_param(self.per_page.as_deref()),
            default_per_page,
            max_per_page,
        )
    }
}

/// Pagination metadata block of the list envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub pages: i64,
    pub page: i64,
    pub per_page: i64,
}

/// `{data, meta}` envelope returned by list endpoints
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            data,
            meta: PageMeta {
                total,
                pages: page_count(total, request.per_page),
                page: request.page,
                per_page: request.per_page,
            },
        }
    }
}
