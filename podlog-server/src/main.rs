//! podlog-server - REST backend for podcast guests, episodes and appearances
//!
//! Startup order: arguments, configuration, tracing, database, signing
//! secret, router, serve.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use podlog_common::api::{load_or_create_token_secret, TokenSigner};
use podlog_common::config::TomlConfig;
use podlog_common::db::init_database;
use podlog_server::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for podlog-server
///
/// Flags and environment variables override the TOML config file.
#[derive(Parser, Debug)]
#[command(name = "podlog-server")]
#[command(about = "REST backend for podcast guests, episodes and rated appearances")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "PODLOG_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "PODLOG_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind to
    #[arg(long, env = "PODLOG_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PODLOG_PORT")]
    port: Option<u16>,

    /// Token signing secret
    #[arg(long, env = "PODLOG_JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Print a bearer token for SUBJECT and exit
    #[arg(long, value_name = "SUBJECT")]
    issue_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any database delay
    info!(
        "Starting podlog-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let db_path = args
        .database
        .clone()
        .unwrap_or_else(|| config.resolve_database_path());
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let secret = match args.jwt_secret.or_else(|| config.jwt_secret.clone()) {
        Some(secret) if !secret.is_empty() => secret,
        _ => load_or_create_token_secret(&pool)
            .await
            .context("Failed to load token signing secret")?,
    };
    let tokens = TokenSigner::new(secret, config.token_ttl_secs);

    if let Some(subject) = args.issue_token {
        println!("{}", tokens.issue(&subject));
        return Ok(());
    }

    let state = AppState::new(pool, tokens);
    let app = build_router(state);

    let host = args.host.unwrap_or_else(|| config.host.clone());
    let port = args.port.unwrap_or(config.port);
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("podlog-server listening on http://{}", addr);
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
            info!("Received SIGTERM, shutting down");
        },
    }
}
