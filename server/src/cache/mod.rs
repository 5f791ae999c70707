//! Offline cache in front of the static site.
//!
//! DESIGN
//! ======
//! `store` holds named response caches and the versioned core cache with its
//! install/activate lifecycle. `strategy` classifies each request and answers
//! it network-first, cache-first, stale-while-revalidate, or cache-else-network.
//! Entries live in memory for the lifetime of the process.

pub mod store;
pub mod strategy;

pub use store::{CacheStorage, OfflineCache};
pub use strategy::respond;
