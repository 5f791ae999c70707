//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server is a caching front for the static pond site. `/healthz` answers
//! directly; every other request goes through the offline cache, which decides
//! per request whether to use the network, the cache, or both.

pub mod offline;

use axum::Router;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .fallback(offline::handle)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
