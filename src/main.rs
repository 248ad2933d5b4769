//! Text Analysis Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rutext_analyzer::api::{self, AppState};
use rutext_analyzer::config::ServiceConfig;
use rutext_analyzer::engine::AnalysisEngine;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rutext_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ServiceConfig::from_env();
    // Models and dictionaries load once here and are shared read-only
    // across all requests.
    let engine = Arc::new(AnalysisEngine::new(config.clone()));
    let app = api::router(AppState { engine });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "text analysis service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
