//! Per-request caching strategies.
//!
//! | Class | Matches | Strategy |
//! |-------|---------|----------|
//! | `Passthrough` | any non-GET | straight to the origin |
//! | `Navigation` | `Sec-Fetch-Mode: navigate` or `Accept: text/html` | network-first, fallback `/index.html` |
//! | `Asset` | `/assets/*` | cache-first, populate on miss |
//! | `Revalidate` | `/data/*`, `*.js`, `*.css`, `*.wasm` | stale-while-revalidate |
//! | `Default` | everything else | cache, else network |
//!
//! Entries are keyed by path and query.

use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::state::AppState;
use crate::upstream::{Fetched, UpstreamError};

/// Key navigations are stored under and fall back to.
pub const NAVIGATION_FALLBACK: &str = "/index.html";

const REVALIDATE_EXTENSIONS: [&str; 3] = [".js", ".css", ".wasm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    Passthrough,
    Navigation,
    Asset,
    Revalidate,
    Default,
}

/// Pick the strategy for a request.
#[must_use]
pub fn classify(method: &Method, path: &str, headers: &HeaderMap) -> RequestClass {
    if method != Method::GET {
        RequestClass::Passthrough
    } else if is_navigation(headers) {
        RequestClass::Navigation
    } else if path.starts_with("/assets/") {
        RequestClass::Asset
    } else if path.starts_with("/data/") || REVALIDATE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        RequestClass::Revalidate
    } else {
        RequestClass::Default
    }
}

fn is_navigation(headers: &HeaderMap) -> bool {
    let mode_navigate = headers
        .get("sec-fetch-mode")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("navigate"));
    let wants_html = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"));
    mode_navigate || wants_html
}

/// Answer one request through the offline cache.
pub async fn respond(state: &AppState, method: &Method, uri: &Uri, headers: &HeaderMap) -> Response {
    let path = uri.path();
    let key = uri.path_and_query().map_or(path, |pq| pq.as_str());
    match classify(method, path, headers) {
        RequestClass::Passthrough => match state.upstream.fetch(method, key, headers).await {
            Ok(fetched) => fetched.into_response(),
            Err(e) => bad_gateway(key, &e),
        },
        RequestClass::Navigation => network_first(state, key, headers).await,
        RequestClass::Asset => cache_first(state, key, headers).await,
        RequestClass::Revalidate => stale_while_revalidate(state, key, headers).await,
        RequestClass::Default => cache_else_network(state, key, headers).await,
    }
}

async fn network_first(state: &AppState, key: &str, headers: &HeaderMap) -> Response {
    match state.upstream.fetch(&Method::GET, key, headers).await {
        Ok(fetched) => {
            state.cache.put(NAVIGATION_FALLBACK, fetched.clone()).await;
            fetched.into_response()
        }
        Err(e) => match state.cache.lookup(NAVIGATION_FALLBACK).await {
            Some(cached) => {
                debug!(%key, error = %e, "navigation served from cache");
                cached.into_response()
            }
            None => bad_gateway(key, &e),
        },
    }
}

async fn cache_first(state: &AppState, key: &str, headers: &HeaderMap) -> Response {
    if let Some(cached) = state.cache.lookup(key).await {
        return cached.into_response();
    }
    match fetch_and_store(state, key, headers).await {
        Ok(fetched) => fetched.into_response(),
        Err(e) => bad_gateway(key, &e),
    }
}

async fn stale_while_revalidate(state: &AppState, key: &str, headers: &HeaderMap) -> Response {
    if let Some(cached) = state.cache.lookup(key).await {
        spawn_revalidate(state.clone(), key.to_owned(), headers.clone());
        return cached.into_response();
    }
    match fetch_and_store(state, key, headers).await {
        Ok(fetched) => fetched.into_response(),
        Err(e) => bad_gateway(key, &e),
    }
}

async fn cache_else_network(state: &AppState, key: &str, headers: &HeaderMap) -> Response {
    if let Some(cached) = state.cache.lookup(key).await {
        return cached.into_response();
    }
    match state.upstream.fetch(&Method::GET, key, headers).await {
        Ok(fetched) => fetched.into_response(),
        Err(e) => bad_gateway(key, &e),
    }
}

/// Refresh `key` in the background. A failed refresh keeps the cached copy.
fn spawn_revalidate(state: AppState, key: String, headers: HeaderMap) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = fetch_and_store(&state, &key, &headers).await {
            debug!(%key, error = %e, "revalidation failed, keeping cached copy");
        }
    })
}

async fn fetch_and_store(state: &AppState, key: &str, headers: &HeaderMap) -> Result<Fetched, UpstreamError> {
    let fetched = state.upstream.fetch(&Method::GET, key, headers).await?;
    state.cache.put(key, fetched.clone()).await;
    Ok(fetched)
}

fn bad_gateway(key: &str, error: &UpstreamError) -> Response {
    warn!(%key, error = %error, "upstream unavailable and nothing cached");
    (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
}

#[cfg(test)]
#[path = "strategy_test.rs"]
mod tests;
