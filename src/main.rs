//! Space Travel Command Center
//!
//! Web console for the evacuation fleet: list, inspect, build and destroy
//! spacecraft, and transfer them between planets. All data lives in the
//! remote Space Travel service; the console keeps no state of its own
//! between requests.

mod api;
mod config;
mod error;
mod flow;
mod models;
mod navigation;
mod render;
mod routes;
mod state;
mod views;

use crate::api::HttpSpaceTravelApi;
use crate::config::Settings;
use crate::render::Templates;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting Space Travel Command Center...");

    // Load configuration
    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    let api = HttpSpaceTravelApi::new(&settings.api.base_url, settings.api.timeout)?;
    info!(
        "🛰️  Space Travel API at {} (timeout {:?})",
        api.base_url(),
        settings.api.timeout
    );

    let templates = Templates::new()?;
    let state = Arc::new(AppState::new(Arc::new(api), templates));

    // Build the router
    let app = create_router(state);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 Pages:");
    info!("   GET  /                          - Command center");
    info!("   GET  /spacecrafts               - Fleet");
    info!("   POST /spacecrafts/:id/destroy   - Destroy from the fleet list");
    info!("   GET  /spacecraft/:id            - Spacecraft details");
    info!("   POST /spacecraft/:id/destroy    - Destroy from the detail page");
    info!("   GET  /construction              - Build form");
    info!("   POST /construction              - Build a spacecraft");
    info!("   GET  /planets                   - Planets and transfers");
    info!("   POST /planets/transfer          - Transfer a spacecraft");
    info!("   GET  /health                    - Health check");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,space_travel_console=debug,tower_http=debug")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
