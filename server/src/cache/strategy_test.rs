use std::sync::Arc;
use std::time::Duration;

use axum::body::to_bytes;
use axum::http::HeaderValue;

use super::*;
use crate::state::test_helpers::{MockUpstream, test_app_state};

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

async fn get(state: &AppState, uri: &'static str, hdrs: &HeaderMap) -> (StatusCode, String) {
    let response = respond(state, &Method::GET, &Uri::from_static(uri), hdrs).await;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Wait for a background revalidation to land.
async fn eventually_cached(state: &AppState, key: &str, expected: &str) {
    for _ in 0..100 {
        if let Some(hit) = state.cache.lookup(key).await
            && hit.body == expected.as_bytes()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("{key} never refreshed to {expected:?}");
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn classify_by_method_headers_and_path() {
    let none = HeaderMap::new();
    assert_eq!(classify(&Method::POST, "/assets/a.png", &none), RequestClass::Passthrough);
    assert_eq!(classify(&Method::GET, "/pond", &headers(&[("sec-fetch-mode", "navigate")])), RequestClass::Navigation);
    assert_eq!(
        classify(&Method::GET, "/", &headers(&[("accept", "text/html,application/xhtml+xml")])),
        RequestClass::Navigation
    );
    assert_eq!(classify(&Method::GET, "/assets/lobster.png", &none), RequestClass::Asset);
    assert_eq!(classify(&Method::GET, "/data/devices.json", &none), RequestClass::Revalidate);
    assert_eq!(classify(&Method::GET, "/pkg/client.js", &none), RequestClass::Revalidate);
    assert_eq!(classify(&Method::GET, "/styles.css", &none), RequestClass::Revalidate);
    assert_eq!(classify(&Method::GET, "/pkg/client_bg.wasm", &none), RequestClass::Revalidate);
    assert_eq!(classify(&Method::GET, "/favicon.ico", &none), RequestClass::Default);
}

#[test]
fn navigation_wins_over_path_rules() {
    let nav = headers(&[("sec-fetch-mode", "navigate")]);
    assert_eq!(classify(&Method::GET, "/assets/page", &nav), RequestClass::Navigation);
}

// =============================================================================
// Navigation: network-first
// =============================================================================

#[tokio::test]
async fn navigation_prefers_network_and_stores_fallback() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.serve("/", "fresh shell");
    let state = test_app_state(upstream.clone());
    let nav = headers(&[("sec-fetch-mode", "navigate")]);

    assert_eq!(get(&state, "/", &nav).await, (StatusCode::OK, "fresh shell".to_owned()));
    let stored = state.cache.lookup(NAVIGATION_FALLBACK).await.unwrap();
    assert_eq!(stored.body, "fresh shell".as_bytes());
}

#[tokio::test]
async fn navigation_falls_back_to_cached_index_offline() {
    let upstream = Arc::new(MockUpstream::with_core_site());
    let state = test_app_state(upstream.clone());
    state.cache.install(upstream.as_ref()).await.unwrap();
    upstream.set_offline(true);

    let nav = headers(&[("accept", "text/html")]);
    assert_eq!(get(&state, "/some/deep/link", &nav).await, (StatusCode::OK, "core /index.html".to_owned()));
}

#[tokio::test]
async fn navigation_offline_without_cache_is_bad_gateway() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.set_offline(true);
    let state = test_app_state(upstream);
    let nav = headers(&[("sec-fetch-mode", "navigate")]);
    assert_eq!(get(&state, "/", &nav).await.0, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn navigation_error_page_is_not_stored() {
    let upstream = Arc::new(MockUpstream::new());
    let state = test_app_state(upstream);
    let nav = headers(&[("sec-fetch-mode", "navigate")]);
    assert_eq!(get(&state, "/missing", &nav).await.0, StatusCode::NOT_FOUND);
    assert!(state.cache.lookup(NAVIGATION_FALLBACK).await.is_none());
}

// =============================================================================
// Assets: cache-first
// =============================================================================

#[tokio::test]
async fn asset_fetched_once_then_served_from_cache() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.serve("/assets/lobster.png", "claws");
    let state = test_app_state(upstream.clone());
    let none = HeaderMap::new();

    assert_eq!(get(&state, "/assets/lobster.png", &none).await.1, "claws");
    upstream.serve("/assets/lobster.png", "new claws");
    assert_eq!(get(&state, "/assets/lobster.png", &none).await.1, "claws");
    assert_eq!(upstream.call_count("/assets/lobster.png"), 1);
}

#[tokio::test]
async fn missing_asset_is_not_cached() {
    let upstream = Arc::new(MockUpstream::new());
    let state = test_app_state(upstream.clone());
    let none = HeaderMap::new();

    assert_eq!(get(&state, "/assets/none.png", &none).await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&state, "/assets/none.png", &none).await.0, StatusCode::NOT_FOUND);
    assert_eq!(upstream.call_count("/assets/none.png"), 2);
}

#[tokio::test]
async fn asset_offline_without_cache_is_bad_gateway() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.set_offline(true);
    let state = test_app_state(upstream);
    assert_eq!(get(&state, "/assets/bg.png", &HeaderMap::new()).await.0, StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Data and code: stale-while-revalidate
// =============================================================================

#[tokio::test]
async fn revalidate_serves_stale_then_refreshes() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.serve("/data/devices.json", "[1]");
    let state = test_app_state(upstream.clone());
    let none = HeaderMap::new();

    assert_eq!(get(&state, "/data/devices.json", &none).await.1, "[1]");
    upstream.serve("/data/devices.json", "[2]");
    assert_eq!(get(&state, "/data/devices.json", &none).await.1, "[1]");
    eventually_cached(&state, "/data/devices.json", "[2]").await;
    assert_eq!(get(&state, "/data/devices.json", &none).await.1, "[2]");
}

#[tokio::test]
async fn failed_revalidation_keeps_cached_copy() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.serve("/styles.css", "body{}");
    let state = test_app_state(upstream.clone());
    let none = HeaderMap::new();

    get(&state, "/styles.css", &none).await;
    upstream.set_offline(true);
    assert_eq!(get(&state, "/styles.css", &none).await, (StatusCode::OK, "body{}".to_owned()));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(state.cache.lookup("/styles.css").await.unwrap().body, "body{}".as_bytes());
}

#[tokio::test]
async fn revalidate_miss_offline_is_bad_gateway() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.set_offline(true);
    let state = test_app_state(upstream);
    assert_eq!(get(&state, "/pkg/client.js", &HeaderMap::new()).await.0, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn query_string_is_part_of_the_key() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.serve("/data/devices.json?v=2", "[v2]");
    let state = test_app_state(upstream.clone());

    assert_eq!(get(&state, "/data/devices.json?v=2", &HeaderMap::new()).await.1, "[v2]");
    assert!(state.cache.lookup("/data/devices.json?v=2").await.is_some());
    assert!(state.cache.lookup("/data/devices.json").await.is_none());
}

// =============================================================================
// Default: cache, else network
// =============================================================================

#[tokio::test]
async fn default_uses_cache_when_present() {
    let upstream = Arc::new(MockUpstream::with_core_site());
    let state = test_app_state(upstream.clone());
    state.cache.install(upstream.as_ref()).await.unwrap();
    upstream.set_offline(true);

    assert_eq!(get(&state, "/index.html", &HeaderMap::new()).await.1, "core /index.html");
}

#[tokio::test]
async fn default_network_response_is_not_stored() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.serve("/favicon.ico", "ico");
    let state = test_app_state(upstream.clone());

    assert_eq!(get(&state, "/favicon.ico", &HeaderMap::new()).await.1, "ico");
    assert!(state.cache.lookup("/favicon.ico").await.is_none());
}

// =============================================================================
// Passthrough
// =============================================================================

#[tokio::test]
async fn non_get_goes_straight_to_origin() {
    let upstream = Arc::new(MockUpstream::with_core_site());
    let state = test_app_state(upstream.clone());
    state.cache.install(upstream.as_ref()).await.unwrap();

    let response = respond(&state, &Method::POST, &Uri::from_static("/index.html"), &HeaderMap::new()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(upstream.calls().contains(&(Method::POST, "/index.html".to_owned())));
}
