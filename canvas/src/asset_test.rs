use std::cell::RefCell;

use futures::executor::block_on;

use super::*;

/// Loader that succeeds only for URLs in `available` and records every attempt.
struct FakeLoader {
    available: Vec<&'static str>,
    attempts: RefCell<Vec<String>>,
}

impl FakeLoader {
    fn new(available: &[&'static str]) -> Self {
        Self { available: available.to_vec(), attempts: RefCell::new(Vec::new()) }
    }

    fn attempts(&self) -> Vec<String> {
        self.attempts.borrow().clone()
    }
}

impl ImageLoader for FakeLoader {
    type Image = String;

    async fn load(&self, url: &str) -> Result<String, AssetError> {
        self.attempts.borrow_mut().push(url.to_owned());
        if self.available.contains(&url) {
            Ok(url.to_owned())
        } else {
            Err(AssetError::Load { url: url.to_owned() })
        }
    }
}

#[test]
fn first_candidate_wins_without_trying_rest() {
    let loader = FakeLoader::new(&["a.webp", "a.png"]);
    let image = block_on(load_first_available(&loader, &["a.webp", "a.png"]));
    assert_eq!(image.as_deref(), Some("a.webp"));
    assert_eq!(loader.attempts(), vec!["a.webp"]);
}

#[test]
fn falls_through_failed_candidates_in_order() {
    let loader = FakeLoader::new(&["a.jpg"]);
    let image = block_on(load_first_available(&loader, &["a.webp", "a.png", "a.jpg", "a.jpeg"]));
    assert_eq!(image.as_deref(), Some("a.jpg"));
    assert_eq!(loader.attempts(), vec!["a.webp", "a.png", "a.jpg"]);
}

#[test]
fn all_failing_yields_none() {
    let loader = FakeLoader::new(&[]);
    let image = block_on(load_first_available(&loader, &["x.png", "x.webp"]));
    assert!(image.is_none());
    assert_eq!(loader.attempts().len(), 2);
}

#[test]
fn empty_candidate_list_yields_none() {
    let loader = FakeLoader::new(&["x.png"]);
    assert!(block_on(load_first_available(&loader, &[])).is_none());
}

#[test]
fn resolve_uses_kind_candidates() {
    let loader = FakeLoader::new(&["assets/web/aquarium_bg.png"]);
    let slot = block_on(resolve(&loader, AssetKind::Background));
    assert_eq!(slot.image().map(String::as_str), Some("assets/web/aquarium_bg.png"));
    assert_eq!(loader.attempts(), vec!["assets/web/aquarium_bg.webp", "assets/web/aquarium_bg.png"]);
}

#[test]
fn resolve_missing_sprite_is_missing_slot() {
    let loader = FakeLoader::new(&[]);
    let slot = block_on(resolve(&loader, AssetKind::Bubble));
    assert!(matches!(slot, AssetSlot::Missing));
    assert!(slot.image().is_none());
}

#[test]
fn scene_assets_start_pending() {
    let assets: SceneAssets<String> = SceneAssets::default();
    for slot in [&assets.background, &assets.lobster, &assets.bubble, &assets.feed] {
        assert!(matches!(slot, AssetSlot::Pending));
        assert!(slot.image().is_none());
    }
}

#[test]
fn scene_assets_set_targets_one_slot() {
    let mut assets: SceneAssets<String> = SceneAssets::default();
    assets.set(AssetKind::Feed, AssetSlot::Ready("feed".to_owned()));
    assert_eq!(assets.feed.image().map(String::as_str), Some("feed"));
    assert!(matches!(assets.lobster, AssetSlot::Pending));
}

#[test]
fn every_kind_has_candidates() {
    for kind in AssetKind::ALL {
        assert!(!kind.candidates().is_empty());
    }
    assert_eq!(AssetKind::Background.candidates().len(), 4);
}
