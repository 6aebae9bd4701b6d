//! Prospect lifecycle engine — HTTP API entry point.

use prospecting_api::{build_router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "prospecting=info".into()))
        .init();

    let config = prospecting_infra::load_config()?;
    let bind_addr = config.http_bind_addr.clone();

    let state = AppState::new(config).await?;
    state.start_schedulers().await?;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "prospecting api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
