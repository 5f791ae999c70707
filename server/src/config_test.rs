use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.static_dir, PathBuf::from("public"));
    assert_eq!(cfg.upstream_url, None);
    assert_eq!(cfg.cache_version, "v1.0.0");
    assert_eq!(cfg.upstream_timeout, Duration::from_secs(10));
}

#[test]
fn overrides_are_applied() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("STATIC_DIR", "/srv/pond"),
        ("UPSTREAM_URL", "https://pond.example/"),
        ("CACHE_VERSION", "v2"),
        ("UPSTREAM_TIMEOUT_SECS", "3"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.static_dir, PathBuf::from("/srv/pond"));
    assert_eq!(cfg.upstream_url.as_deref(), Some("https://pond.example"));
    assert_eq!(cfg.cache_version, "v2");
    assert_eq!(cfg.upstream_timeout, Duration::from_secs(3));
}

#[test]
fn empty_values_count_as_unset() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("UPSTREAM_URL", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.upstream_url, None);
}

#[test]
fn invalid_port_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "http".to_owned() });
    assert_eq!(err.to_string(), "invalid PORT: \"http\"");
}

#[test]
fn invalid_timeout_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("UPSTREAM_TIMEOUT_SECS", "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "UPSTREAM_TIMEOUT_SECS", .. }));
}
