use std::sync::Arc;

use anyhow::Context;
use cinedeck_metadata::OmdbClient;
use cinedeck_server::config::AppConfig;
use cinedeck_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().context("failed to read configuration")?;
    info!(api_url = %config.api_url, titles = config.catalogue.len(), "configuration loaded");

    let client = OmdbClient::with_base_url(config.api_key.clone(), config.api_url.clone());
    let app_state = AppState::new(Arc::new(client), config.catalogue.clone());

    // Populate the start page in the background; the page shows the loading
    // status until this completes.
    {
        let state = app_state.clone();
        tokio::spawn(async move {
            state.load_catalogue().await;
        });
    }

    let app = cinedeck_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
