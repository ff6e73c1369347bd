//! Page Cache - A Redis-backed page fetch cache
//!
//! Serves pages through the caching fetcher over a small HTTP front.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use page_cache::api::create_router;
use page_cache::{
    spawn_cleanup_task, AppState, CachingFetcher, Config, HttpFetcher, KeyValueStore,
    MemoryStore, RedisStore, StoreBackend,
};

/// Main entry point for the page cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the configured store (and its sweep task for the memory store)
/// 4. Wrap the HTTP fetcher in the caching fetcher
/// 5. Start HTTP server on configured port
/// 6. On SIGINT/SIGTERM, stop serving and close the store
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "page_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting page cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, cache_ttl={}s, port={}",
        config.store_backend, config.cache_ttl, config.server_port
    );

    let (store, cleanup_handle): (Arc<dyn KeyValueStore>, Option<JoinHandle<()>>) =
        match config.store_backend {
            StoreBackend::Redis => {
                let store = RedisStore::open(&config.redis_url)
                    .context("failed to configure Redis store")?;
                let store: Arc<dyn KeyValueStore> = Arc::new(store);
                (store, None)
            }
            StoreBackend::Memory => {
                let store = Arc::new(MemoryStore::new());
                let handle = spawn_cleanup_task(store.clone(), config.cleanup_interval);
                (store as Arc<dyn KeyValueStore>, Some(handle))
            }
        };

    let http = HttpFetcher::new().context("failed to build HTTP client")?;
    let fetcher = CachingFetcher::new(Arc::new(http), store.clone()).with_ttl(config.cache_ttl);
    info!("Caching pages for {}s", fetcher.ttl_secs());
    let app = create_router(AppState::new(fetcher));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
    store.close().await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
