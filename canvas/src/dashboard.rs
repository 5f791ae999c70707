//! Mock dashboard: per-device cards fed by random sampling on a poll timer.
//!
//! One card per device, ordered feeder, aerator, the rest by name, pump last.
//! Every poll resamples each card in that order. The aerator card in `Auto`
//! mode reads the DO card's *displayed* text, so it reacts to the DO value of
//! the previous pass (the DO card comes later in the order). The feeder card
//! owns the countdown and triggers an automatic feed burst each time it hits
//! zero.
//!
//! The dashboard never touches the scene directly. Side effects come back as
//! [`DashboardAction`]s for the host to route into the engine.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::collections::VecDeque;

use crate::consts::{
    CARD_HISTORY_LEN, DO_FALLBACK, DO_THRESHOLD, FEED_BURST_AUTOMATIC, FEED_BURST_MANUAL, FEEDER_RESET_MINS,
    FEEDER_STEP_MINS, POLL_INTERVAL_MS,
};
use crate::device::{Device, DeviceId, DeviceKind};
use crate::rng::RandomSource;

/// Placeholder shown before the first sample.
pub const PLACEHOLDER: &str = "--";

/// Aerator control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AeratorMode {
    On,
    Off,
    /// Follow the dissolved-oxygen reading.
    #[default]
    Auto,
}

impl AeratorMode {
    pub const ALL: [Self; 3] = [Self::On, Self::Off, Self::Auto];

    /// Button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Auto => "AUTO",
        }
    }
}

/// Side effects requested by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// Emit this many feed particles at the feeder.
    FeedBurst(usize),
    /// The aerator's effective state after a poll.
    SetAerator(bool),
    /// Pulse the Feed Now button.
    PulseFeedButton,
}

/// One dashboard card.
#[derive(Debug, Clone)]
pub struct Card {
    device_id: DeviceId,
    name: String,
    kind: DeviceKind,
    value: String,
    bar: Option<f64>,
    history: VecDeque<f64>,
}

impl Card {
    fn new(device: &Device) -> Self {
        Self {
            device_id: device.id.clone(),
            name: device.name.clone(),
            kind: device.kind,
            value: PLACEHOLDER.to_owned(),
            bar: None,
            history: VecDeque::with_capacity(CARD_HISTORY_LEN),
        }
    }

    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Displayed value text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Fill-bar percentage in `0..=100`, or `None` when the card has no bar
    /// or has not been sampled yet.
    #[must_use]
    pub fn bar(&self) -> Option<f64> {
        self.bar
    }

    /// Recent numeric samples, oldest first.
    #[must_use]
    pub fn history(&self) -> &VecDeque<f64> {
        &self.history
    }

    fn show(&mut self, value: String, bar: Option<f64>) {
        self.value = value;
        if self.kind.has_bar()
            && let Some(pct) = bar
        {
            self.bar = Some(pct.clamp(0.0, 100.0));
        }
    }

    fn record(&mut self, sample: f64) {
        if self.history.len() == CARD_HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(sample);
    }
}

/// The dashboard model.
#[derive(Debug, Clone)]
pub struct Dashboard {
    cards: Vec<Card>,
    aerator_mode: AeratorMode,
    feeder_remaining: u32,
    last_poll_ms: f64,
}

impl Dashboard {
    /// Build cards for `devices` and run the first sampling pass immediately.
    pub fn new(devices: &[Device], now_ms: f64, rng: &mut impl RandomSource) -> (Self, Vec<DashboardAction>) {
        let mut sorted: Vec<&Device> = devices.iter().collect();
        sorted.sort_by(|a, b| {
            a.kind
                .dashboard_priority()
                .cmp(&b.kind.dashboard_priority())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
        });
        let mut dashboard = Self {
            cards: sorted.into_iter().map(Card::new).collect(),
            aerator_mode: AeratorMode::default(),
            feeder_remaining: FEEDER_RESET_MINS,
            last_poll_ms: now_ms,
        };
        let actions = dashboard.sample_all(0.0, rng);
        (dashboard, actions)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// First card of the given kind.
    #[must_use]
    pub fn card_of_kind(&self, kind: DeviceKind) -> Option<&Card> {
        self.cards.iter().find(|c| c.kind == kind)
    }

    #[must_use]
    pub fn aerator_mode(&self) -> AeratorMode {
        self.aerator_mode
    }

    /// Change the aerator mode. The card reflects it on the next poll.
    pub fn set_aerator_mode(&mut self, mode: AeratorMode) {
        self.aerator_mode = mode;
    }

    /// Minutes left on the feeder countdown.
    #[must_use]
    pub fn feeder_remaining(&self) -> u32 {
        self.feeder_remaining
    }

    /// Poll timer fired at `now_ms`. The elapsed time is measured from the
    /// previous fire even when the page is hidden; a hidden page skips the
    /// resampling entirely.
    pub fn poll(&mut self, now_ms: f64, visible: bool, rng: &mut impl RandomSource) -> Vec<DashboardAction> {
        let elapsed = now_ms - self.last_poll_ms;
        self.last_poll_ms = now_ms;
        if !visible {
            return Vec::new();
        }
        self.sample_all(elapsed, rng)
    }

    /// Manual feed: reset the countdown, show it, and burst.
    pub fn feed_now(&mut self) -> Vec<DashboardAction> {
        self.feeder_remaining = FEEDER_RESET_MINS;
        let text = feeder_text(self.feeder_remaining);
        if let Some(card) = self.cards.iter_mut().find(|c| c.kind == DeviceKind::Feeder) {
            card.show(text, None);
        }
        vec![DashboardAction::FeedBurst(FEED_BURST_MANUAL), DashboardAction::PulseFeedButton]
    }

    fn sample_all(&mut self, elapsed_ms: f64, rng: &mut impl RandomSource) -> Vec<DashboardAction> {
        let mut actions = Vec::new();
        for i in 0..self.cards.len() {
            let kind = self.cards[i].kind;
            let (value, bar, sample) = match kind {
                DeviceKind::Temp => {
                    let v = round_to(rng.range(25.0, 28.5), 1);
                    (format!("{v:.1}°C"), Some((v - 20.0) / 15.0 * 100.0), Some(v))
                }
                DeviceKind::Ph => {
                    let v = round_to(rng.range(7.4, 8.2), 2);
                    (format!("{v:.2}"), Some((v - 6.0) / 3.0 * 100.0), Some(v))
                }
                DeviceKind::Do => {
                    let v = round_to(rng.range(5.5, 8.0), 1);
                    (format!("{v:.1} mg/L"), Some((v - 3.0) / 6.0 * 100.0), Some(v))
                }
                DeviceKind::Level => {
                    let v = round_to(rng.range(88.0, 98.0), 0);
                    (format!("{v:.0}%"), Some(v), Some(v))
                }
                DeviceKind::Pump => ("ON".to_owned(), None, None),
                DeviceKind::Aerator => {
                    let on = self.aerator_should_run();
                    actions.push(DashboardAction::SetAerator(on));
                    let text = if on { "ON" } else { "OFF" };
                    (text.to_owned(), Some(if on { 100.0 } else { 0.0 }), None)
                }
                DeviceKind::Feeder => {
                    if let Some(burst) = self.step_feeder(elapsed_ms) {
                        actions.push(burst);
                    }
                    (feeder_text(self.feeder_remaining), None, None)
                }
                DeviceKind::Other => ("OK".to_owned(), Some(50.0), None),
            };
            let card = &mut self.cards[i];
            card.show(value, bar);
            if let Some(sample) = sample {
                card.record(sample);
            }
        }
        actions
    }

    fn aerator_should_run(&self) -> bool {
        match self.aerator_mode {
            AeratorMode::On => true,
            AeratorMode::Off => false,
            AeratorMode::Auto => {
                let reading = match self.card_of_kind(DeviceKind::Do) {
                    Some(card) if !card.value.is_empty() => parse_leading_number(&card.value),
                    _ => Some(DO_FALLBACK),
                };
                reading.is_some_and(|v| v < DO_THRESHOLD)
            }
        }
    }

    /// Decrement the countdown; returns the automatic burst when it hits zero.
    fn step_feeder(&mut self, elapsed_ms: f64) -> Option<DashboardAction> {
        let missed = missed_ticks(elapsed_ms);
        let step = if missed > 0 { missed.saturating_mul(FEEDER_STEP_MINS) } else { FEEDER_STEP_MINS };
        let before = self.feeder_remaining;
        self.feeder_remaining = before.saturating_sub(step);
        if before > 0 && self.feeder_remaining == 0 {
            self.feeder_remaining = FEEDER_RESET_MINS;
            return Some(DashboardAction::FeedBurst(FEED_BURST_AUTOMATIC));
        }
        None
    }
}

/// Whole poll intervals contained in `elapsed_ms`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn missed_ticks(elapsed_ms: f64) -> u32 {
    let ticks = (elapsed_ms.max(0.0) / POLL_INTERVAL_MS).floor();
    if ticks >= f64::from(u32::MAX) { u32::MAX } else { ticks as u32 }
}

/// Feeder card text for a countdown value.
#[must_use]
pub fn feeder_text(minutes: u32) -> String {
    format!("Next: {minutes}m")
}

/// Parse the number at the start of `text` (`"5.8 mg/L"` → `5.8`).
/// Returns `None` when the text does not start with a number.
#[must_use]
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    match text[..end].trim_end_matches('.').parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
