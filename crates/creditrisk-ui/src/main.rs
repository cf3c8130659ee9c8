use std::sync::Arc;

use anyhow::Result;
use creditrisk_config::UiConfig;
use creditrisk_ui::{app, UiState};
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

    let config = UiConfig::load()?;
    let state = Arc::new(UiState::new(&config)?);

    info!("Starting form UI on {} (locale: {})", config.bind, config.locale);
    info!("  Risk service: {}", state.client.url());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
