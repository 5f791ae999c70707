//! Device data fetch.
//!
//! Browser (csr): real HTTP call via `gloo-net`.
//! Native builds: a stub returning `ApiError::Unavailable`, so the crate and
//! its tests build without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned as `ApiError` and logged by the caller. The page keeps
//! running with an empty device list.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use canvas::device::Device;
#[cfg(any(test, feature = "csr"))]
use canvas::device::parse_devices;

/// Relative URL of the device data file.
pub const DEVICES_URL: &str = "data/devices.json";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid device data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("network is not available in this build")]
    Unavailable,
}

#[cfg(any(test, feature = "csr"))]
fn decode_devices(status: u16, body: &str) -> Result<Vec<Device>, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status(status));
    }
    Ok(parse_devices(body)?)
}

/// Fetch and parse the device list from [`DEVICES_URL`].
///
/// # Errors
///
/// Returns `ApiError` when the request fails, the server answers with a
/// non-success status, or the body is not a device array.
pub async fn fetch_devices() -> Result<Vec<Device>, ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(DEVICES_URL)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        decode_devices(status, &body)
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(ApiError::Unavailable)
    }
}
