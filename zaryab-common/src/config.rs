//! Configuration loading
//!
//! Config file resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. `ZARYAB_CONFIG` environment variable
//! 3. `config.toml` in the platform config directory
//! 4. Compiled defaults (fallback)
//!
//! A missing file never stops startup: the service logs a warning and runs on
//! defaults.

use crate::db::{PostType, Taxonomy};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "ZARYAB_CONFIG";

/// Service configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener to
    pub bind: String,
    pub port: u16,
    /// SQLite content store
    pub database: PathBuf,
    /// Prefix every content route is mounted under
    pub api_prefix: String,
    pub default_per_page: i64,
    /// Default page size of `/podcasts`
    pub podcast_per_page: i64,
    /// Upper bound for `per_page`; 0 disables the cap
    pub max_per_page: i64,
    /// Content types reported by global search, in response order
    pub search_post_types: Vec<PostType>,
    /// Taxonomies exposed as `/{taxonomy}` term listings
    pub taxonomy_routes: Vec<Taxonomy>,
    pub log_level: String,
    pub cors_allow_any: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5780,
            database: default_database_path(),
            api_prefix: "/wp-json/v1".to_string(),
            default_per_page: 10,
            podcast_per_page: 21,
            max_per_page: 100,
            search_post_types: vec![
                PostType::Story,
                PostType::Poem,
                PostType::Article,
                PostType::Review,
                PostType::Podcast,
                PostType::Letter,
            ],
            taxonomy_routes: vec![
                Taxonomy::StoryType,
                Taxonomy::PoemType,
                Taxonomy::LetterType,
                Taxonomy::ReviewType,
                Taxonomy::PodcastType,
                Taxonomy::ArticleType,
                Taxonomy::Collection,
            ],
            log_level: "info".to_string(),
            cors_allow_any: true,
        }
    }
}

impl ApiConfig {
    /// Parse TOML text; absent keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ApiConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject values the paginator and router cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.default_per_page < 1 || self.podcast_per_page < 1 {
            return Err(Error::Config("per-page defaults must be at least 1".to_string()));
        }
        if self.max_per_page < 0 {
            return Err(Error::Config("max_per_page must not be negative".to_string()));
        }
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(Error::Config(format!(
                "api_prefix must start with '/': {}",
                self.api_prefix
            )));
        }
        if self.api_prefix.ends_with('/') {
            return Err(Error::Config(format!(
                "api_prefix must not end with '/': {}",
                self.api_prefix
            )));
        }
        Ok(())
    }
}

/// Locate the config file by priority; `None` means run on defaults
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    dirs::config_dir()
        .map(|d| d.join("zaryab").join("config.toml"))
        .filter(|p| p.exists())
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file named or found; compiled defaults
    Defaults,
    /// A file was named but does not exist; compiled defaults
    Missing(PathBuf),
    File(PathBuf),
}

impl ConfigSource {
    /// Report the outcome; call once a subscriber is installed
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => info!("No config file found, using compiled defaults"),
            ConfigSource::Missing(path) => {
                warn!("Config file not found: {} (using defaults)", path.display())
            }
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
        }
    }
}

/// Load configuration with graceful degradation
///
/// An explicitly named file that fails to parse is an error; a file that is
/// simply absent falls back to defaults. Nothing is logged here: the caller
/// reports the returned [`ConfigSource`] after logging is set up.
pub fn load_config(cli_arg: Option<&Path>) -> Result<(ApiConfig, ConfigSource)> {
    let Some(path) = resolve_config_path(cli_arg) else {
        return Ok((ApiConfig::default(), ConfigSource::Defaults));
    };

    if !path.exists() {
        return Ok((ApiConfig::default(), ConfigSource::Missing(path)));
    }

    let config = ApiConfig::from_file(&path)?;
    Ok((config, ConfigSource::File(path)))
}

/// OS-dependent default location of the content store
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("zaryab").join("zaryab.db"))
        .unwrap_or_else(|| PathBuf::from("./zaryab_data/zaryab.db"))
}
