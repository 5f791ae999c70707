//! Device list as loaded from the static data file.
//!
//! DESIGN
//! ======
//! The list is fetched once at startup. A failed fetch leaves it empty so the
//! overlay and dashboard simply render nothing.

#[cfg(test)]
#[path = "pond_test.rs"]
mod pond_test;

use canvas::device::Device;

/// Progress of the one-time device fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Devices shown in the overlay and dashboard.
#[derive(Clone, Debug, Default)]
pub struct PondState {
    pub devices: Vec<Device>,
    pub status: LoadStatus,
}

impl PondState {
    /// Record a successful fetch.
    pub fn loaded(&mut self, devices: Vec<Device>) {
        self.devices = devices;
        self.status = LoadStatus::Ready;
    }

    /// Record a failed fetch. Any previous list is dropped.
    pub fn failed(&mut self) {
        self.devices.clear();
        self.status = LoadStatus::Failed;
    }

    #[must_use]
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }
}
