//! Device overlay input: hover tooltips, click-to-open, and drag-to-move.
//!
//! `OverlayInput` is a small state machine over `Idle`, `Hovering`, and
//! `Dragging`. The host forwards DOM events (pointer events on an icon, plus
//! pointer move/up observed on the window) and applies the returned
//! [`OverlayAction`]s to the DOM. Dragging writes the session override in
//! [`DeviceStore`] directly, so particle emitters follow the icon at once.
//!
//! A press that travels more than [`DRAG_THRESHOLD_PX`] becomes a drag, and
//! the click that the browser fires right after the release must not open the
//! modal. The suppression is lifted by a zero-delay timer the host schedules on
//! [`OverlayAction::ScheduleClickReset`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::DRAG_THRESHOLD_PX;
use crate::device::{DeviceId, DeviceStore};
use crate::geom::{PercentPos, Point, Size};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            _ => Self::Secondary,
        }
    }
}

/// Overlay gesture state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OverlayState {
    /// Nothing under the pointer or focused.
    #[default]
    Idle,
    /// Tooltip shown for `id`.
    Hovering { id: DeviceId },
    /// Primary button held on `id`.
    Dragging {
        id: DeviceId,
        /// Client-space pointer position at press.
        start: Point,
        /// Device position at press.
        origin: PercentPos,
        /// Overlay bounding box at press; deltas are relative to it.
        overlay: Size,
        /// Whether the pointer has crossed the drag threshold.
        moved: bool,
    },
}

/// Effects for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayAction {
    ShowTooltip(DeviceId),
    HideTooltip(DeviceId),
    /// Reposition the icon; the override is already stored.
    MoveDevice { id: DeviceId, pos: PercentPos },
    OpenModal(DeviceId),
    /// Call [`OverlayInput::reset_click_suppression`] on a zero-delay timer.
    ScheduleClickReset,
}

/// The overlay state machine.
#[derive(Debug, Clone, Default)]
pub struct OverlayInput {
    state: OverlayState,
    suppress_click: bool,
}

impl OverlayInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Whether the next click is swallowed because it ends a drag.
    #[must_use]
    pub fn is_click_suppressed(&self) -> bool {
        self.suppress_click
    }

    /// Pointer entered an icon.
    pub fn pointer_enter(&mut self, id: &str) -> Vec<OverlayAction> {
        if matches!(self.state, OverlayState::Dragging { .. }) {
            return Vec::new();
        }
        self.state = OverlayState::Hovering { id: id.to_owned() };
        vec![OverlayAction::ShowTooltip(id.to_owned())]
    }

    /// Pointer left an icon.
    pub fn pointer_leave(&mut self, id: &str) -> Vec<OverlayAction> {
        if matches!(&self.state, OverlayState::Hovering { id: current } if current == id) {
            self.state = OverlayState::Idle;
        }
        vec![OverlayAction::HideTooltip(id.to_owned())]
    }

    /// Keyboard focus reached an icon.
    pub fn focus(&mut self, id: &str) -> Vec<OverlayAction> {
        self.pointer_enter(id)
    }

    /// Keyboard focus left an icon.
    pub fn blur(&mut self, id: &str) -> Vec<OverlayAction> {
        self.pointer_leave(id)
    }

    /// Button pressed on an icon. Only the primary button starts a drag.
    pub fn pointer_down(
        &mut self,
        id: &str,
        button: Button,
        client: Point,
        overlay: Size,
        store: &DeviceStore,
    ) -> Vec<OverlayAction> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some(origin) = store.percent_position(id) else {
            return Vec::new();
        };
        self.state = OverlayState::Dragging { id: id.to_owned(), start: client, origin, overlay, moved: false };
        vec![OverlayAction::HideTooltip(id.to_owned())]
    }

    /// Pointer moved anywhere in the window.
    pub fn pointer_move(&mut self, client: Point, store: &mut DeviceStore) -> Vec<OverlayAction> {
        let OverlayState::Dragging { id, start, origin, overlay, moved } = &mut self.state else {
            return Vec::new();
        };
        let dx = client.x - start.x;
        let dy = client.y - start.y;
        if dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX {
            *moved = true;
            self.suppress_click = true;
        }
        if !overlay.is_drawable() {
            return Vec::new();
        }
        let wanted = PercentPos::new(origin.x + dx / overlay.width * 100.0, origin.y + dy / overlay.height * 100.0);
        match store.set_override(id, wanted) {
            Some(pos) => vec![OverlayAction::MoveDevice { id: id.clone(), pos }],
            None => Vec::new(),
        }
    }

    /// Button released anywhere in the window.
    pub fn pointer_up(&mut self) -> Vec<OverlayAction> {
        if !matches!(self.state, OverlayState::Dragging { .. }) {
            return Vec::new();
        }
        self.state = OverlayState::Idle;
        vec![OverlayAction::ScheduleClickReset]
    }

    /// Click on an icon. Opens the modal unless it ends a drag.
    pub fn click(&mut self, id: &str) -> Vec<OverlayAction> {
        if self.suppress_click {
            return Vec::new();
        }
        vec![OverlayAction::OpenModal(id.to_owned())]
    }

    /// Lift click suppression; called from the timer scheduled on release.
    pub fn reset_click_suppression(&mut self) {
        self.suppress_click = false;
    }
}
