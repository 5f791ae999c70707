mod cache;
mod config;
mod routes;
mod state;
mod upstream;

use std::sync::Arc;

use crate::cache::{CacheStorage, OfflineCache};
use crate::config::ServerConfig;
use crate::upstream::{DirUpstream, HttpUpstream, Upstream};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let upstream: Arc<dyn Upstream> = match &config.upstream_url {
        Some(url) => match HttpUpstream::new(url, config.upstream_timeout) {
            Ok(client) => {
                tracing::info!(%url, "fronting remote origin");
                Arc::new(client)
            }
            Err(e) => {
                tracing::error!(error = %e, "upstream client init failed");
                std::process::exit(1);
            }
        },
        None => {
            tracing::info!(dir = %config.static_dir.display(), "serving static directory");
            Arc::new(DirUpstream::new(&config.static_dir))
        }
    };

    // Pre-cache failure is non-fatal: requests still reach the origin.
    let cache = OfflineCache::new(CacheStorage::new(), &config.cache_version);
    if let Err(e) = cache.install(upstream.as_ref()).await {
        tracing::warn!(cache = cache.name(), error = %e, "core cache install failed, starting with an empty cache");
    }
    cache.activate().await;

    let app = routes::app(state::AppState::new(cache, upstream));
    let port = config.port;
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%port, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%port, "weblobster listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
