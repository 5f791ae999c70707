//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the offline cache and the upstream origin behind it; both are cheap
//! to clone and shared with background revalidation tasks.

use std::sync::Arc;

use crate::cache::OfflineCache;
use crate::upstream::Upstream;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub cache: OfflineCache,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    #[must_use]
    pub fn new(cache: OfflineCache, upstream: Arc<dyn Upstream>) -> Self {
        Self { cache, upstream }
    }
}
