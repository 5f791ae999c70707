//! View state of the device overlay (icon positions and visible tooltips).
//!
//! DESIGN
//! ======
//! The engine owns the authoritative positions and the gesture state machine.
//! This struct mirrors only what the DOM needs to render, and is updated by
//! replaying the `OverlayAction`s the engine returns. Actions that need the
//! host (opening the modal, deferring the click reset) are handed back as
//! `HostEffect`s.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use std::collections::{HashMap, HashSet};

use canvas::device::{Device, DeviceId};
use canvas::geom::PercentPos;
use canvas::input::OverlayAction;

/// Follow-up work the overlay cannot do by itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEffect {
    OpenModal(DeviceId),
    /// Clear click suppression on the next turn of the event loop.
    ScheduleClickReset,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayView {
    positions: HashMap<DeviceId, PercentPos>,
    tooltips: HashSet<DeviceId>,
}

impl OverlayView {
    /// Start over from the clamped base positions of `devices`.
    pub fn reset(&mut self, devices: &[Device]) {
        self.positions = devices.iter().map(|d| (d.id.clone(), d.base_position())).collect();
        self.tooltips.clear();
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<PercentPos> {
        self.positions.get(id).copied()
    }

    #[must_use]
    pub fn tooltip_visible(&self, id: &str) -> bool {
        self.tooltips.contains(id)
    }

    /// Replay engine actions onto the view.
    pub fn apply(&mut self, actions: Vec<OverlayAction>) -> Vec<HostEffect> {
        let mut effects = Vec::new();
        for action in actions {
            match action {
                OverlayAction::ShowTooltip(id) => {
                    self.tooltips.insert(id);
                }
                OverlayAction::HideTooltip(id) => {
                    self.tooltips.remove(&id);
                }
                OverlayAction::MoveDevice { id, pos } => {
                    self.positions.insert(id, pos);
                }
                OverlayAction::OpenModal(id) => effects.push(HostEffect::OpenModal(id)),
                OverlayAction::ScheduleClickReset => effects.push(HostEffect::ScheduleClickReset),
            }
        }
        effects
    }
}
