//! Orders API HTTP Server
//!
//! Main entry point for the mock orders service.

use std::{sync::Arc, time::Duration};

use application::ports::{MetricsPort, metric_names as m};
use infrastructure::{AppConfig, PrometheusMetricsAdapter, init_tracing};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration comes first; the log format depends on it
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.telemetry, config.server.log_format)?;

    info!("Orders API v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        environment = %config.environment,
        "Configuration loaded"
    );

    let metrics: Arc<dyn MetricsPort> = Arc::new(
        PrometheusMetricsAdapter::new()
            .map_err(|e| anyhow::anyhow!("Failed to initialize metrics: {e}"))?,
    );
    metrics.set_gauge(
        m::SERVICE_BUILD_INFO,
        &[
            (m::LABEL_VERSION, env!("CARGO_PKG_VERSION").to_string()),
            (m::LABEL_ENVIRONMENT, config.environment.to_string()),
        ],
        1.0,
    );

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    let state = AppState::new(config, metrics);
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("Metrics: http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        warn!("Shutdown timeout elapsed, exiting");
        std::process::exit(0);
    });
}
