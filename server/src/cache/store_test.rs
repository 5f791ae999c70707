use super::*;
use crate::state::test_helpers::MockUpstream;
use axum::body::Bytes;

fn entry(body: &'static str) -> Fetched {
    Fetched::new(StatusCode::OK, &HeaderMap::new(), Bytes::from_static(body.as_bytes()))
}

// =============================================================================
// Naming
// =============================================================================

#[test]
fn cache_name_is_versioned() {
    assert_eq!(cache_name("v1.0.0"), "weblobster-core-v1.0.0");
    assert_eq!(OfflineCache::new(CacheStorage::new(), "v2").name(), "weblobster-core-v2");
}

#[test]
fn shipped_site_provides_core_assets_outside_the_bundle() {
    let public = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../public");
    for path in CORE_ASSETS.iter().filter(|p| !p.starts_with("/pkg/")) {
        let file = if *path == "/" { "index.html" } else { path.trim_start_matches('/') };
        assert!(public.join(file).is_file(), "missing {path}");
    }
    let index = std::fs::read_to_string(public.join("index.html")).unwrap();
    let bundle = CORE_ASSETS.iter().find(|p| p.starts_with("/pkg/")).unwrap();
    assert!(index.contains(&format!("from \"{bundle}\"")));
}

// =============================================================================
// Install
// =============================================================================

#[tokio::test]
async fn install_precaches_core_assets() {
    let cache = OfflineCache::new(CacheStorage::new(), "v1.0.0");
    let upstream = MockUpstream::with_core_site();
    assert_eq!(cache.install(&upstream).await.unwrap(), CORE_ASSETS.len());
    for path in CORE_ASSETS {
        let hit = cache.lookup(path).await.unwrap();
        assert_eq!(hit.body, Bytes::from(format!("core {path}")));
    }
}

#[tokio::test]
async fn install_is_all_or_nothing() {
    let storage = CacheStorage::new();
    let cache = OfflineCache::new(storage.clone(), "v1.0.0");
    let upstream = MockUpstream::with_core_site();
    upstream.respond("/styles.css", StatusCode::NOT_FOUND, "");
    let err = cache.install(&upstream).await.unwrap_err();
    assert!(matches!(err, CacheError::Status { ref path, status } if path == "/styles.css" && status == StatusCode::NOT_FOUND));
    assert!(cache.lookup("/").await.is_none());
    assert!(storage.keys().await.is_empty());
}

#[tokio::test]
async fn install_reports_transport_failure() {
    let cache = OfflineCache::new(CacheStorage::new(), "v1.0.0");
    let upstream = MockUpstream::with_core_site();
    upstream.set_offline(true);
    let err = cache.install(&upstream).await.unwrap_err();
    assert!(matches!(err, CacheError::Fetch { ref path, .. } if path == "/"));
    assert!(err.to_string().starts_with("pre-cache of / failed"));
}

// =============================================================================
// Activate
// =============================================================================

#[tokio::test]
async fn activate_deletes_only_old_core_versions() {
    let storage = CacheStorage::new();
    storage.put("weblobster-core-v0.9.0", "/", entry("old")).await;
    storage.put("weblobster-core-v1.0.0", "/", entry("new")).await;
    storage.put("other-cache", "/", entry("keep")).await;

    let cache = OfflineCache::new(storage.clone(), "v1.0.0");
    assert_eq!(cache.activate().await, vec!["weblobster-core-v0.9.0".to_owned()]);
    assert_eq!(storage.keys().await, vec!["other-cache".to_owned(), "weblobster-core-v1.0.0".to_owned()]);
}

// =============================================================================
// Put / lookup
// =============================================================================

#[tokio::test]
async fn put_skips_error_responses() {
    let cache = OfflineCache::new(CacheStorage::new(), "v1.0.0");
    let missing = Fetched::new(StatusCode::NOT_FOUND, &HeaderMap::new(), Bytes::new());
    assert!(!cache.put("/assets/x.png", missing).await);
    assert!(cache.lookup("/assets/x.png").await.is_none());
    assert!(cache.put("/assets/x.png", entry("png")).await);
    assert_eq!(cache.lookup("/assets/x.png").await.map(|f| f.body), Some(Bytes::from_static(b"png")));
}

#[tokio::test]
async fn caches_are_isolated_by_name() {
    let storage = CacheStorage::new();
    storage.put("a", "/x", entry("a")).await;
    assert!(storage.lookup("b", "/x").await.is_none());
    assert!(storage.delete("a").await);
    assert!(!storage.delete("a").await);
}
