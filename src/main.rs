//! Market API server binary.

use anyhow::Context;
use clap::Parser;
use market_api::api::rest::{AppState, create_router};
use market_api::config::AppConfig;
use market_api::telemetry;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "market-api", version, about)]
struct Args {
    /// Path to a configuration file. Defaults to `config/default` if present.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config =
        AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    telemetry::init(&config.log).context("failed to initialize logging")?;

    let state = match config.database.url.as_deref() {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await
                .context("failed to connect to database")?;
            info!(
                max_connections = config.database.max_connections,
                "using PostgreSQL storage"
            );
            AppState::postgres(pool)
        }
        None => {
            warn!("no database url configured, using in-memory storage");
            AppState::in_memory()
        }
    };

    let address = config.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, "market api listening");

    axum::serve(listener, create_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("market api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
