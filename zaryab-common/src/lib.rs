//! # Zaryab Common Library
//!
//! Shared code for the Zaryab content API including:
//! - Content models (posts, custom fields, relations, taxonomy terms)
//! - Database initialization for the SQLite content store
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
