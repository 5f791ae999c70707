//! Fallback handler that serves the site through the offline cache.

use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;

use crate::cache;
use crate::state::AppState;

pub async fn handle(State(state): State<AppState>, method: Method, uri: Uri, headers: HeaderMap) -> Response {
    cache::respond(&state, &method, &uri, &headers).await
}

#[cfg(test)]
#[path = "offline_test.rs"]
mod tests;
