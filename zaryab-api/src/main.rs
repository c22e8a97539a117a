//! zaryab-api - Content REST API service
//!
//! Serves the CMS content store (posts, custom fields, taxonomy terms) as JSON
//! under a configurable prefix, plus `/health` and `/buildinfo`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zaryab_api::repository::SqliteContentRepository;
use zaryab_api::{build_router, AppState};
use zaryab_common::config::{load_config, CONFIG_ENV_VAR};
use zaryab_common::db::init_database;

/// Command-line arguments for zaryab-api
#[derive(Parser, Debug)]
#[command(name = "zaryab-api")]
#[command(about = "Content REST API for the Zaryab CMS")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Address to bind to (overrides config)
    #[arg(short, long, env = "ZARYAB_BIND")]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "ZARYAB_PORT")]
    port: Option<u16>,

    /// SQLite content store (overrides config)
    #[arg(short, long, env = "ZARYAB_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, source) =
        load_config(args.config.as_deref()).context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "zaryab_api={0},zaryab_common={0},tower_http={0}",
                    config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Zaryab Content API (zaryab-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    source.log();

    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.database = database;
    }

    info!("Database path: {}", config.database.display());
    let pool = init_database(&config.database)
        .await
        .context("Failed to open content database")?;

    let addr = format!("{}:{}", config.bind, config.port);
    let prefix = config.api_prefix.clone();

    let state = AppState::new(Arc::new(SqliteContentRepository::new(pool)), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("zaryab-api listening on http://{}{}", addr, prefix);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
