//! herald-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST, SSE, and WebSocket endpoints.

use tracing_subscriber::EnvFilter;

use herald_gateway::api;
use herald_gateway::app_state::AppState;
use herald_gateway::config::{GatewayConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        max_delay_ms = u64::try_from(config.delivery_max_delay.as_millis()).unwrap_or(u64::MAX),
        "starting herald-gateway"
    );

    // Build application state and router
    let state = AppState::from_config(&config);
    let dispatcher = state.notification_service.dispatcher().clone();
    let shutdown = state.shutdown.clone();
    let app = api::build_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Open streams never finish on their own.
            shutdown.cancel();
        })
        .await?;

    let stats = dispatcher.stats();
    tracing::info!(
        scheduled = stats.scheduled,
        delivered = stats.delivered,
        in_flight = stats.in_flight(),
        "server stopped"
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
