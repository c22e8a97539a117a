//! Content store: schema initialization and content models

pub mod init;
pub mod models;

pub use init::*;
pub use models::*;
