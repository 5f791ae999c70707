//! Upstream origins the offline cache fronts.
//!
//! DESIGN
//! ======
//! `Upstream` is the network side of the cache. `DirUpstream` serves a local
//! directory through `tower_http::services::ServeDir`; `HttpUpstream` proxies a
//! remote origin with `reqwest`. Responses are buffered into `Fetched` so the
//! cache can store and replay them.
//!
//! ERROR HANDLING
//! ==============
//! Only transport failures are errors. A 404 or 500 from the origin is a
//! successful fetch with that status; the caller decides what to cache.

use std::path::Path;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderName, Method, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Upper bound on a buffered response body.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Response headers kept when buffering.
static KEPT_HEADERS: [HeaderName; 4] = [header::CONTENT_TYPE, header::CACHE_CONTROL, header::ETAG, header::LAST_MODIFIED];

/// Request headers forwarded to the origin.
static FORWARDED_HEADERS: [HeaderName; 2] = [header::ACCEPT, header::ACCEPT_LANGUAGE];

/// A fully buffered upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Fetched {
    #[must_use]
    pub fn new(status: StatusCode, headers: &HeaderMap, body: Bytes) -> Self {
        let mut kept = HeaderMap::new();
        for name in KEPT_HEADERS.iter() {
            if let Some(value) = headers.get(name) {
                kept.insert(name.clone(), value.clone());
            }
        }
        Self { status, headers: kept, body }
    }

    /// Whether this response may be stored.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.status.is_success()
    }
}

impl IntoResponse for Fetched {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(String),
    #[error("upstream body read failed: {0}")]
    Body(String),
    #[error("http client build failed: {0}")]
    ClientBuild(String),
}

/// The network side of the offline cache. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch `path_and_query` from the origin.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] when the origin cannot be reached or the body
    /// cannot be read.
    async fn fetch(&self, method: &Method, path_and_query: &str, headers: &HeaderMap) -> Result<Fetched, UpstreamError>;
}

fn forwarded(headers: &HeaderMap) -> impl Iterator<Item = (&HeaderName, &axum::http::HeaderValue)> {
    FORWARDED_HEADERS.iter().filter_map(|name| headers.get(name).map(|value| (name, value)))
}

// =============================================================================
// LOCAL DIRECTORY
// =============================================================================

/// Serves files from a local directory.
#[derive(Clone)]
pub struct DirUpstream {
    serve: ServeDir,
}

impl DirUpstream {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self { serve: ServeDir::new(dir).append_index_html_on_directories(true) }
    }
}

#[async_trait::async_trait]
impl Upstream for DirUpstream {
    async fn fetch(&self, method: &Method, path_and_query: &str, headers: &HeaderMap) -> Result<Fetched, UpstreamError> {
        let mut builder = Request::builder().method(method.clone()).uri(path_and_query);
        for (name, value) in forwarded(headers) {
            builder = builder.header(name, value);
        }
        let request = builder.body(Body::empty()).map_err(|e| UpstreamError::Request(e.to_string()))?;
        let response = match self.serve.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), MAX_BODY_BYTES)
            .await
            .map_err(|e| UpstreamError::Body(e.to_string()))?;
        Ok(Fetched::new(parts.status, &parts.headers, body))
    }
}

// =============================================================================
// REMOTE ORIGIN
// =============================================================================

/// Proxies a remote origin over HTTP.
pub struct HttpUpstream {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUpstream {
    /// # Errors
    ///
    /// Returns [`UpstreamError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::ClientBuild(e.to_string()))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn url_for(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.base_url)
    }
}

#[async_trait::async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, method: &Method, path_and_query: &str, headers: &HeaderMap) -> Result<Fetched, UpstreamError> {
        let mut request = self.client.request(method.clone(), self.url_for(path_and_query));
        for (name, value) in forwarded(headers) {
            request = request.header(name, value);
        }
        let response = request.send().await.map_err(|e| UpstreamError::Request(e.to_string()))?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| UpstreamError::Body(e.to_string()))?;
        Ok(Fetched::new(status, &response_headers, body))
    }
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod tests;
