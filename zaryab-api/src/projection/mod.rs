//! JSON shapes returned by the content endpoints
//!
//! Every constructor is a pure mapping from a [`ContentItem`] and its
//! already-resolved related items. Missing custom fields project as `null`,
//! missing relations as `null` or an empty name.
//!
//! [`ContentItem`]: zaryab_common::db::ContentItem

pub mod people;
pub mod posts;
pub mod stories;
pub mod taxonomy;
pub mod text;

pub use people::*;
pub use posts::*;
pub use stories::*;
pub use taxonomy::{format_terms, TermRef, TermWithCount};
pub use text::{auto_excerpt, autop, excerpt_by_lines};
