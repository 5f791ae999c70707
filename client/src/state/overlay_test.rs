#![allow(clippy::float_cmp)]

use super::*;
use canvas::device::{DeviceStore, parse_devices};

fn view() -> OverlayView {
    let devices = parse_devices(
        r#"[
        {"id": "a", "name": "Aerator", "type": "aerator", "x": 0.25, "y": 0.8},
        {"id": "f", "name": "Feeder", "type": "feeder", "x": 0.5, "y": 0.1}
    ]"#,
    )
    .unwrap();
    let mut view = OverlayView::default();
    view.reset(&devices);
    view
}

// =============================================================
// Positions
// =============================================================

#[test]
fn reset_uses_base_positions() {
    let view = view();
    assert_eq!(view.position("a"), Some(PercentPos::new(25.0, 80.0)));
    assert_eq!(view.position("f"), Some(PercentPos::new(50.0, 10.0)));
    assert_eq!(view.position("x"), None);
}

#[test]
fn reset_clamps_like_the_scene() {
    let devices = parse_devices(r#"[{"id": "p", "name": "Pump", "type": "pump", "x": 1.4, "y": -0.2}]"#).unwrap();
    let mut view = OverlayView::default();
    view.reset(&devices);

    let mut store = DeviceStore::new();
    store.load(devices);
    assert_eq!(view.position("p"), Some(PercentPos::new(100.0, 0.0)));
    assert_eq!(view.position("p"), store.percent_position("p"));
}

#[test]
fn move_updates_position_only_for_that_device() {
    let mut view = view();
    let effects = view.apply(vec![OverlayAction::MoveDevice { id: "a".to_owned(), pos: PercentPos::new(40.0, 60.0) }]);
    assert!(effects.is_empty());
    assert_eq!(view.position("a"), Some(PercentPos::new(40.0, 60.0)));
    assert_eq!(view.position("f"), Some(PercentPos::new(50.0, 10.0)));
}

// =============================================================
// Tooltips and host effects
// =============================================================

#[test]
fn tooltips_toggle_independently() {
    let mut view = view();
    view.apply(vec![OverlayAction::ShowTooltip("a".to_owned()), OverlayAction::ShowTooltip("f".to_owned())]);
    assert!(view.tooltip_visible("a"));
    assert!(view.tooltip_visible("f"));
    view.apply(vec![OverlayAction::HideTooltip("a".to_owned())]);
    assert!(!view.tooltip_visible("a"));
    assert!(view.tooltip_visible("f"));
}

#[test]
fn reset_hides_tooltips() {
    let mut view = view();
    view.apply(vec![OverlayAction::ShowTooltip("a".to_owned())]);
    view.reset(&[]);
    assert!(!view.tooltip_visible("a"));
    assert_eq!(view.position("a"), None);
}

#[test]
fn modal_and_click_reset_are_passed_to_host() {
    let mut view = view();
    let effects = view.apply(vec![OverlayAction::ScheduleClickReset, OverlayAction::OpenModal("f".to_owned())]);
    assert_eq!(effects, vec![HostEffect::ScheduleClickReset, HostEffect::OpenModal("f".to_owned())]);
}
