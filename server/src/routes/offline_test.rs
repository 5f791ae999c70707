use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use crate::routes::app;
use crate::state::test_helpers::{MockUpstream, test_app_state};

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn healthz_bypasses_cache() {
    let upstream = Arc::new(MockUpstream::new());
    let router = app(test_app_state(upstream.clone()));
    assert_eq!(send(router, get("/healthz")).await, (StatusCode::OK, "ok".to_owned()));
    assert!(upstream.calls().is_empty());
}

// =============================================================================
// Offline serving
// =============================================================================

#[tokio::test]
async fn installed_site_serves_offline() {
    let upstream = Arc::new(MockUpstream::with_core_site());
    let state = test_app_state(upstream.clone());
    state.cache.install(upstream.as_ref()).await.unwrap();
    upstream.set_offline(true);

    let nav = Request::builder()
        .uri("/")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(app(state.clone()), nav).await, (StatusCode::OK, "core /index.html".to_owned()));
    assert_eq!(send(app(state.clone()), get("/data/devices.json")).await.1, "core /data/devices.json");
    assert_eq!(send(app(state), get("/assets/unknown.png")).await.0, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn cached_response_keeps_content_type() {
    let upstream = Arc::new(MockUpstream::new());
    upstream.serve("/assets/pond.png", "png");
    let state = test_app_state(upstream);

    send(app(state.clone()), get("/assets/pond.png")).await;
    let response = app(state).oneshot(get("/assets/pond.png")).await.unwrap();
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
}

#[tokio::test]
async fn origin_status_passes_through() {
    let upstream = Arc::new(MockUpstream::new());
    let router = app(test_app_state(upstream));
    assert_eq!(send(router, get("/nope.txt")).await.0, StatusCode::NOT_FOUND);
}
