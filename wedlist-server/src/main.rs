//! wedlist-server - wedding guest list and RSVP service
//!
//! Startup: parse arguments, load the TOML config, resolve settings, open the
//! database, serve.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wedlist_common::config::{config_file_path, read_toml_config, ServerConfig, TomlConfig};
use wedlist_common::db::init_database;
use wedlist_server::cli::Args;
use wedlist_server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = config_file_path(args.config.as_deref())?;
    let file = match &config_path {
        Some(path) => read_toml_config(path)?,
        None => TomlConfig::default(),
    };
    let config = ServerConfig::resolve(args.into_overrides(), file);

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting wedlist-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) => info!("Loaded config file: {}", path.display()),
        None => warn!("No config file found, using defaults"),
    }
    info!("Database: {}", config.database_path.display());

    let pool = init_database(&config.database_path).await?;
    info!("Database connection established");

    let state = AppState::new(pool).with_max_upload_bytes(config.max_upload_bytes);
    let app = wedlist_server::build_router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Listening on http://{}", bind_address);
    info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
