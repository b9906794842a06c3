//! Caching Proxy - A local HTTP caching proxy
//!
//! Forwards requests to a single origin and answers repeated requests for the
//! same path and query from memory.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caching_proxy::{cache::CacheStore, create_router, AppState, Command, Config};

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Parse command line flags
/// 3. Either clear the cache and exit, or
/// 4. Create the shared state, bind the listener and serve until
///    SIGINT/SIGTERM, then log cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caching_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_args()? {
        Command::ClearCache => {
            clear_cache();
            return Ok(());
        }
        Command::Serve(config) => config,
    };

    let state = AppState::from_config(&config).context("failed to create origin client")?;
    let app = create_router(state.clone());

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(
        "Proxy server running on http://{} forwarding to {}",
        addr,
        state.origin.base_url()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let stats = state.cache.read().await.stats();
    info!(
        "Server shutdown complete: hits={}, misses={}, entries={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.total_entries,
        stats.hit_rate()
    );

    Ok(())
}

/// Clears the cache instead of starting the proxy.
///
/// The cache lives in process memory only, so this empties the store this
/// process would have served from and reports completion.
fn clear_cache() {
    CacheStore::new().clear();
    info!("Cache cleared.");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
