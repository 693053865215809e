//! tsaw-wb (Audit Workbench) - Technical SEO audit checklist service
//!
//! Serves the inspection dataset API, the implementation-checklist
//! projection, CSV export, and the recommendation proxy.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tsaw_common::config::{resolve_root_folder, Config};
use tsaw_common::store::DatasetStore;
use tsaw_wb::{build_router, AppState};

/// Command-line arguments for tsaw-wb
#[derive(Parser, Debug)]
#[command(name = "tsaw-wb")]
#[command(about = "Audit workbench service for TSAW")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "TSAW_WB_PORT")]
    port: u16,

    /// Root folder holding the dataset snapshot
    #[arg(short, long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting TSAW Audit Workbench (tsaw-wb) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Root folder resolution: CLI arg, env var, config file, OS default
    let root_folder = resolve_root_folder(args.root_folder.as_deref(), "TSAW_ROOT_FOLDER")?;
    info!("Root folder: {}", root_folder.display());

    // Process environment is read exactly once, here
    let config = Config::from_env();
    if config.gemini_api_key.is_none() {
        info!("No upstream credential configured; recommendation requests will report the missing configuration");
    } else {
        info!(model = %config.gemini_model, "Upstream client configured");
    }

    let store = DatasetStore::new(root_folder);
    info!("Dataset snapshot: {}", store.snapshot_path().display());

    let state = AppState::new(store, config).context("Failed to initialize application state")?;
    {
        let dataset = state
            .dataset
            .read()
            .map_err(|_| anyhow::anyhow!("dataset lock poisoned"))?;
        info!("Loaded dataset with {} rows", dataset.len());
    }

    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("tsaw-wb listening on http://{}", addr);
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
