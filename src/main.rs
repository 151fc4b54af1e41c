// Main entry point - Dependency injection, poll scheduler and server setup
use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use machine_health_dashboard::application::clock::SystemClock;
use machine_health_dashboard::application::poll_service::PollService;
use machine_health_dashboard::application::scheduler::PollScheduler;
use machine_health_dashboard::infrastructure::config::load_dashboard_config;
use machine_health_dashboard::infrastructure::http_source::HttpDataSource;
use machine_health_dashboard::presentation::app_state::AppState;
use machine_health_dashboard::presentation::handlers::{get_chart, get_dashboard, health_check};
use machine_health_dashboard::presentation::live_view::LiveView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load dashboard configuration")?;

    // Data source (infrastructure layer) and display surface (presentation layer)
    let source = Arc::new(HttpDataSource::new(&config.source)?);
    let view = Arc::new(LiveView::new(&config.display.reading_keys));

    // Poll cycle and its schedule (application layer)
    let poll_service = PollService::new(
        source,
        view.clone(),
        Arc::new(SystemClock),
        config.poll.series_capacity,
    );
    let poller = PollScheduler::new(poll_service, config.poll.interval()).start();

    let state = Arc::new(AppState { view });

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/charts/:id", get(get_chart))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid server.bind_addr {:?}", config.server.bind_addr))?;
    tracing::info!(
        "Starting machine-health dashboard on {}, polling {}",
        addr,
        config.source.base_url
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.shutdown().await;
    tracing::info!("Dashboard stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
