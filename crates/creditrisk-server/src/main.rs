use std::sync::Arc;

use anyhow::Result;
use creditrisk_config::ServiceConfig;
use creditrisk_server::{app, ServerState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServiceConfig::load()?;
    let state = Arc::new(ServerState::load(&config));

    info!("Starting server on {}", config.bind);
    info!("  POST /credit_risk  - assess a loan application");
    info!("  GET  /model_info   - loaded model");
    info!("  GET  /health       - liveness");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
