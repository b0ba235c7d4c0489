use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filmorate_server::config::{Config, StorageBackend};
use filmorate_server::{AppState, routes};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "filmorate-server")]
#[command(about = "REST backend for films, users, likes and friendships")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "FILMORATE_CONFIG")]
    config: Option<PathBuf>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Storage backend (overrides config)
    #[arg(long, env = "STORAGE_BACKEND", value_enum)]
    backend: Option<StorageBackend>,

    /// PostgreSQL connection URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(backend) = cli.backend {
        config.storage.backend = backend;
    }
    if let Some(database_url) = cli.database_url {
        config.storage.database_url = Some(database_url);
    }

    let state = match config.storage.backend {
        StorageBackend::Memory => {
            info!("using in-memory storage backend");
            AppState::in_memory()
        }
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .clone()
                .context("storage.database_url is required for the postgres backend")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.storage.max_connections)
                .connect(&url)
                .await
                .context("failed to connect to PostgreSQL")?;
            filmorate_core::MIGRATOR
                .run(&pool)
                .await
                .context("failed to run database migrations")?;
            info!("using postgres storage backend");
            AppState::postgres(pool)
        }
    };

    let app = routes::router(state);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid bind address")?;

    info!(%addr, "filmorate server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
