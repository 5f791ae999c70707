//! Dashboard panel state.
//!
//! DESIGN
//! ======
//! Wraps the `canvas` dashboard model, which exists only once devices are
//! loaded. Scene-bound actions are returned to the caller; the feed button
//! pulse is the one effect handled here.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use canvas::dashboard::{AeratorMode, Dashboard, DashboardAction};
use canvas::device::Device;
use canvas::rng::RandomSource;

#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub model: Option<Dashboard>,
    /// Sequence bumped each time the feed button should pulse.
    pub pulse_seq: u64,
}

impl DashboardState {
    /// Build the model for `devices` and run the first sampling pass.
    pub fn install(&mut self, devices: &[Device], now_ms: f64, rng: &mut impl RandomSource) -> Vec<DashboardAction> {
        let (model, actions) = Dashboard::new(devices, now_ms, rng);
        self.model = Some(model);
        self.absorb(actions)
    }

    /// One polling tick. Does nothing before `install`.
    pub fn poll(&mut self, now_ms: f64, visible: bool, rng: &mut impl RandomSource) -> Vec<DashboardAction> {
        let actions = match self.model.as_mut() {
            Some(model) => model.poll(now_ms, visible, rng),
            None => return Vec::new(),
        };
        self.absorb(actions)
    }

    /// "Feed now" button.
    pub fn feed_now(&mut self) -> Vec<DashboardAction> {
        let actions = match self.model.as_mut() {
            Some(model) => model.feed_now(),
            None => return Vec::new(),
        };
        self.absorb(actions)
    }

    pub fn set_aerator_mode(&mut self, mode: AeratorMode) {
        if let Some(model) = self.model.as_mut() {
            model.set_aerator_mode(mode);
        }
    }

    #[must_use]
    pub fn aerator_mode(&self) -> AeratorMode {
        self.model.as_ref().map_or(AeratorMode::default(), Dashboard::aerator_mode)
    }

    fn absorb(&mut self, actions: Vec<DashboardAction>) -> Vec<DashboardAction> {
        if actions.contains(&DashboardAction::PulseFeedButton) {
            self.pulse_seq += 1;
        }
        actions.into_iter().filter(|a| *a != DashboardAction::PulseFeedButton).collect()
    }
}
