use super::*;
use canvas::device::parse_devices;
use canvas::modal::{HOW_IT_WORKS_ROWS, ModalContent};

fn device() -> Device {
    parse_devices(
        r#"[{"id": "t", "name": "Sensor Suhu", "type": "temp", "x": 0.4, "y": 0.6,
             "description": "Air", "photo": "p.jpg"}]"#,
    )
    .unwrap()
    .remove(0)
}

fn run_to_end(state: &mut ModalState) -> usize {
    let mut ticks = 0;
    while let Some((ticket, _)) = state.pending() {
        state.tick(ticket);
        ticks += 1;
    }
    ticks
}

// =============================================================
// Reveal scheduling
// =============================================================

#[test]
fn closed_modal_has_nothing_pending() {
    assert_eq!(ModalState::default().pending(), None);
}

#[test]
fn device_reveal_runs_to_completion() {
    let mut state = ModalState::default();
    state.open_device(&device());
    assert_eq!(state.pending().map(|(_, d)| d), Some(14));
    assert_eq!(run_to_end(&mut state), 4);
    match state.modal.content() {
        ModalContent::Device { description, .. } => {
            assert_eq!(description.visible(), "Air");
            assert!(!description.is_typing());
        }
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn how_it_works_reveals_every_row() {
    let mut state = ModalState::default();
    state.open_how_it_works();
    assert_eq!(state.pending().map(|(_, d)| d), Some(140));
    run_to_end(&mut state);
    assert_eq!(state.modal.content(), &ModalContent::HowItWorks { revealed: HOW_IT_WORKS_ROWS.len() });
}

#[test]
fn stale_ticket_keeps_current_schedule() {
    let mut state = ModalState::default();
    state.open_device(&device());
    let (old, _) = state.pending().unwrap();
    state.open_how_it_works();
    let current = state.pending();
    state.tick(old);
    assert_eq!(state.pending(), current);
}

// =============================================================
// Closing
// =============================================================

#[test]
fn escape_closes_and_returns_focus() {
    let mut state = ModalState::default();
    state.open_device(&device());
    assert_eq!(state.on_key_down("Enter"), None);
    assert!(state.pending().is_some());
    assert_eq!(state.on_key_down("Escape"), Some(FocusTarget::Device("t".to_owned())));
    assert_eq!(state.pending(), None);
    assert!(!state.modal.is_open());
}

#[test]
fn backdrop_click_closes_but_inner_click_does_not() {
    let mut state = ModalState::default();
    state.open_how_it_works();
    assert_eq!(state.on_overlay_click(false), None);
    assert!(state.modal.is_open());
    assert_eq!(state.on_overlay_click(true), Some(FocusTarget::HowButton));
}

#[test]
fn close_button_clears_pending() {
    let mut state = ModalState::default();
    state.open_device(&device());
    assert!(state.close().is_some());
    assert_eq!(state.pending(), None);
    assert_eq!(state.close(), None);
}
