use std::sync::Arc;

use anyhow::Context;
use storefront::config::StorefrontConfig;
use storefront::router::create_app_router;
use storefront::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = StorefrontConfig::from_env().context("invalid storefront configuration")?;
    let addr = config.bind_addr;

    // Initialize application state
    let state = Arc::new(AppState::new(config).context("failed to create catalog client")?);
    info!(catalog = state.catalog.catalog_url(), "using catalog");
    let _sweeper = AppState::spawn_session_sweeper(&state);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
