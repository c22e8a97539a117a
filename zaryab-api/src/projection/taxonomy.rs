//! Taxonomy term formatting

use serde::Serialize;
use zaryab_common::db::Term;

/// Term as embedded in a content projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermRef {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<&Term> for TermRef {
    fn from(term: &Term) -> Self {
        Self {
            id: term.id,
            name: term.name.clone(),
            slug: term.slug.clone(),
        }
    }
}

/// Term as listed by the taxonomy endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermWithCount {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub count: i64,
}

impl From<&Term> for TermWithCount {
    fn from(term: &Term) -> Self {
        Self {
            id: term.id,
            name: term.name.clone(),
            slug: term.slug.clone(),
            count: term.count,
        }
    }
}

/// Map terms to `{id, name, slug}` in repository order; absent input gives `[]`
pub fn format_terms(terms: Option<&[Term]>) -> Vec<TermRef> {
    terms
        .unwrap_or_default()
        .iter()
        .map(TermRef::from)
        .collect()
}
