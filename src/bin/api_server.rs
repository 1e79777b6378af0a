use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use snowline::api::{create_router, AppState};
use snowline::{Config, ImageryClient, NominatimClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Clients are built once and shared across all requests.
    let state = AppState {
        imagery: Arc::new(ImageryClient::from_config(&config)?),
        geocoder: Arc::new(NominatimClient::new(&config.geocoder_url)?),
    };
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        imagery = %config.imagery_url,
        geocoder = %config.geocoder_url,
        "snow statistics API listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
