//! The RCA dropdown API server.

use rca_dropdown::{api::routes, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// # Errors
///
/// See implementation.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    if config.allowed_origins.is_none() {
        tracing::warn!("`ALLOWED_ORIGINS` is not set, so every request will fail");
    }

    if config.main_db_id.is_none() {
        tracing::warn!("`NOTION_MAIN_DB_ID` is not set, so listing will fail");
    }

    tracing::info!(address = %config.address, "listening");

    let listener = TcpListener::bind(&config.address).await?;
    let router = routes::router(AppState::new(config));

    tracing::info!("ready");

    axum::serve(listener, router).await?;

    Ok(())
}
