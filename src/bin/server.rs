//! Propcast API server
//!
//! Loads (or trains) the forecast and investment models, then serves the
//! HTTP API.
//!
//! # Usage
//! ```sh
//! API_PORT=8000 MODEL_DIR=data/models cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `API_HOST` / `API_PORT` - Listener address (default: 0.0.0.0:8000)
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: *)
//! - `MODEL_DIR` - Model artifact directory (default: data/models)
//! - `TRAINING_SAMPLES` / `TRAINING_SEED` - Synthetic training run (default: 1000 / 42)

use std::sync::Arc;

use anyhow::{Context, Result};
use propcast::application::ml::ModelStore;
use propcast::config::Config;
use propcast::interfaces::http::{AppState, create_app};
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Propcast API {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Listen={}, ModelDir={:?}, Origins={:?}",
        config.server.bind_address(),
        config.models.model_dir,
        config.server.allowed_origins
    );

    // Training is CPU-bound; keep it off the async workers
    let store = ModelStore::new(
        config.models.model_dir.clone(),
        config.models.training_params(),
    );
    let models = tokio::task::spawn_blocking(move || store.load_or_train())
        .await
        .context("Model loading task panicked")?
        .context("Failed to load or train models")?;

    let app = create_app(AppState::new(Arc::new(models)), &config.server);

    let listener = TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address()))?;
    info!("Listening on {}", config.server.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received. Exiting...");
        })
        .await
        .context("Server error")?;

    Ok(())
}
