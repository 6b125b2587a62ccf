mod catalog;
mod compositor;
mod config;
mod errors;
mod layout;
mod models;
mod preview;
mod registry;
mod richtext;
mod routes;
mod state;
mod theme;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::registry::TemplateRegistry;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Static template catalog, built once
    let registry = TemplateRegistry::builtin().context("Invalid built-in template catalog")?;
    info!(
        "Template registry loaded: {} templates, paper {:?}",
        registry.len(),
        config.paper_size
    );

    let state = AppState::new(config.clone(), registry);

    // Consumers that disappear without closing their preview are evicted
    let _sweeper = state.previews.spawn_idle_sweeper(config.preview_idle_ttl);
    info!("Preview idle TTL: {}s", config.preview_idle_ttl.as_secs());

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
