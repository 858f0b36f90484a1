//! Reel Cache - composition root
//!
//! Builds the single shared cache and subscription registry, starts cache
//! maintenance, serves the diagnostics API and tears everything down on exit.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reel_cache::api::create_router;
use reel_cache::{spawn_cleanup_task, AppState, Config, MaintenanceHandle, SharedRegistry};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache and registry
/// 4. Start background cache maintenance
/// 5. Serve the diagnostics router on the configured port
/// 6. On SIGINT/SIGTERM stop maintenance and cancel every subscription
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reel_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reel Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_size={}, default_ttl={}s, port={}, cleanup_interval={}s",
        config.max_size, config.default_ttl, config.server_port, config.cleanup_interval
    );

    let state = AppState::from_config(&config);
    info!("Cache and subscription registry initialized");

    let maintenance = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval_duration());

    let registry = state.registry.clone();
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(maintenance, registry))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then releases background
/// work: maintenance stops and every live subscription is cancelled.
async fn shutdown_signal(maintenance: MaintenanceHandle, registry: SharedRegistry) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    maintenance.stop();
    warn!("Cache maintenance stopped");

    let cancelled = registry.lock().await.cancel_all();
    info!("Cancelled {} live subscriptions", cancelled);
}
