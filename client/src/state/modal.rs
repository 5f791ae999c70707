//! Modal state and its pending reveal step.
//!
//! DESIGN
//! ======
//! `next` holds the step the `canvas` modal asked for last. The modal
//! component watches it and keeps a single timeout alive for the latest
//! `Continue`; a stale ticket is dropped by the model itself.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use canvas::device::Device;
use canvas::modal::{FocusTarget, Modal, RevealStep, RevealTicket};

#[derive(Clone, Debug)]
pub struct ModalState {
    pub modal: Modal,
    pub next: RevealStep,
}

impl Default for ModalState {
    fn default() -> Self {
        Self { modal: Modal::new(), next: RevealStep::Done }
    }
}

impl ModalState {
    pub fn open_device(&mut self, device: &Device) {
        self.next = self.modal.open_device(device);
    }

    pub fn open_how_it_works(&mut self) {
        self.next = self.modal.open_how_it_works();
    }

    /// A reveal timer fired. Stale tickets leave the pending step untouched.
    pub fn tick(&mut self, ticket: RevealTicket) {
        match self.modal.tick(ticket) {
            RevealStep::Stale => {}
            step => self.next = step,
        }
    }

    pub fn close(&mut self) -> Option<FocusTarget> {
        self.next = RevealStep::Done;
        self.modal.close()
    }

    pub fn on_key_down(&mut self, key: &str) -> Option<FocusTarget> {
        let focus = self.modal.on_key_down(key);
        if focus.is_some() {
            self.next = RevealStep::Done;
        }
        focus
    }

    pub fn on_overlay_click(&mut self, on_backdrop: bool) -> Option<FocusTarget> {
        let focus = self.modal.on_overlay_click(on_backdrop);
        if focus.is_some() {
            self.next = RevealStep::Done;
        }
        focus
    }

    /// Timer the host should arm, if any.
    #[must_use]
    pub fn pending(&self) -> Option<(RevealTicket, u32)> {
        match self.next {
            RevealStep::Continue { ticket, delay_ms } => Some((ticket, delay_ms)),
            RevealStep::Done | RevealStep::Stale => None,
        }
    }
}
