//! Modal state machine: device detail and "how it works".
//!
//! The modal is closed or shows exactly one of two contents. Each content has
//! a timed reveal: a per-character typewriter for device descriptions, and a
//! per-row reveal for the how-it-works steps. The host drives both with a
//! single timer, calling [`Modal::tick`] with the [`RevealTicket`] it was
//! handed. Every open and close bumps the generation, so a tick that was
//! already in flight when the content changed is recognised as stale and
//! ignored.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use crate::consts::{HOW_LINE_DELAY_MS, TYPEWRITER_DELAY_MS};
use crate::device::{Device, DeviceId};

/// Title of the how-it-works content.
pub const HOW_IT_WORKS_TITLE: &str = "Cara Kerja Sistem";

/// One row of the how-it-works content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HowRow {
    /// Numbered headline.
    Step(&'static str),
    /// Explanation under a headline.
    Detail(&'static str),
    /// Arrow separator between steps.
    Arrow,
}

impl HowRow {
    /// Text drawn for the row.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Step(text) | Self::Detail(text) => text,
            Self::Arrow => "↓",
        }
    }
}

/// The how-it-works rows, top to bottom.
pub const HOW_IT_WORKS_ROWS: [HowRow; 17] = [
    HowRow::Step("1. Sensor mengukur kondisi air kolam"),
    HowRow::Detail("Suhu, pH, oksigen (DO), dan level air dikumpulkan secara berkala."),
    HowRow::Arrow,
    HowRow::Step("2. Data masuk ke gateway (ESP32 / NodeMCU)"),
    HowRow::Detail("Gateway membaca data, memeriksa batas ambang, dan menjalankan kontrol dasar."),
    HowRow::Arrow,
    HowRow::Step("3. Gateway mengirim data ke Broker MQTT"),
    HowRow::Detail("Data dikirim menggunakan protokol MQTT yang ringan dan efisien."),
    HowRow::Arrow,
    HowRow::Step("4. Cloud IoT memproses dan menyimpan data"),
    HowRow::Detail("Cloud melakukan penyimpanan, analisis tren, visualisasi grafik, dan notifikasi."),
    HowRow::Arrow,
    HowRow::Step("5. Dashboard menampilkan kondisi secara real-time"),
    HowRow::Detail("Operator dapat memantau kualitas air dan menerima peringatan dari perangkat apa pun."),
    HowRow::Arrow,
    HowRow::Step("6. Aktuator menjalankan tindakan otomatis"),
    HowRow::Detail("Aerator, pompa, dan feeder bekerja sesuai kondisi yang terdeteksi oleh sistem."),
];

/// Which control gets keyboard focus back when the modal closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    /// The overlay icon of this device.
    Device(DeviceId),
    /// The how-it-works button.
    HowButton,
}

/// Identifies the reveal a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTicket(u64);

/// What the host should do after opening or ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Call [`Modal::tick`] with `ticket` after `delay_ms`.
    Continue { ticket: RevealTicket, delay_ms: u32 },
    /// The reveal finished; no timer needed.
    Done,
    /// The ticket no longer matches the open content; drop the timer.
    Stale,
}

/// Character-by-character text reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    shown: usize,
    typing: bool,
}

impl Typewriter {
    /// Start with nothing shown.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self { text: text.to_owned(), shown: 0, typing: true }
    }

    /// The revealed prefix.
    #[must_use]
    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.shown) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    /// Whether the typing cursor is still shown.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Reveal one more character, or finish once everything is shown.
    /// Returns whether another tick is needed.
    pub fn advance(&mut self) -> bool {
        if self.shown < self.text.chars().count() {
            self.shown += 1;
        } else {
            self.typing = false;
        }
        self.typing
    }
}

/// Modal content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalContent {
    #[default]
    Closed,
    Device {
        device_id: DeviceId,
        title: String,
        /// Photo URL; only set while this content is open.
        photo: String,
        description: Typewriter,
    },
    HowItWorks {
        /// Number of rows of [`HOW_IT_WORKS_ROWS`] revealed so far.
        revealed: usize,
    },
}

/// The modal and its reveal bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct Modal {
    content: ModalContent,
    generation: u64,
    return_focus: Option<FocusTarget>,
}

impl Modal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn content(&self) -> &ModalContent {
        &self.content
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self.content, ModalContent::Closed)
    }

    /// Heading text, empty while closed.
    #[must_use]
    pub fn title(&self) -> &str {
        match &self.content {
            ModalContent::Closed => "",
            ModalContent::Device { title, .. } => title,
            ModalContent::HowItWorks { .. } => HOW_IT_WORKS_TITLE,
        }
    }

    /// Photo to show, if any. `None` whenever the device content is not open.
    #[must_use]
    pub fn photo(&self) -> Option<&str> {
        match &self.content {
            ModalContent::Device { photo, .. } if !photo.is_empty() => Some(photo),
            _ => None,
        }
    }

    /// Whether the how-it-works text-only layout is active.
    #[must_use]
    pub fn is_text_only(&self) -> bool {
        matches!(self.content, ModalContent::HowItWorks { .. })
    }

    /// Open the detail view for `device`, cancelling any running reveal.
    pub fn open_device(&mut self, device: &Device) -> RevealStep {
        self.generation += 1;
        self.return_focus = Some(FocusTarget::Device(device.id.clone()));
        self.content = ModalContent::Device {
            device_id: device.id.clone(),
            title: device.name.clone(),
            photo: device.photo.clone(),
            description: Typewriter::new(&device.description),
        };
        self.continue_after(TYPEWRITER_DELAY_MS)
    }

    /// Open the how-it-works view. The first row is revealed immediately.
    pub fn open_how_it_works(&mut self) -> RevealStep {
        self.generation += 1;
        self.return_focus = Some(FocusTarget::HowButton);
        self.content = ModalContent::HowItWorks { revealed: 1 };
        if HOW_IT_WORKS_ROWS.len() > 1 { self.continue_after(HOW_LINE_DELAY_MS) } else { RevealStep::Done }
    }

    /// Advance the reveal identified by `ticket`.
    pub fn tick(&mut self, ticket: RevealTicket) -> RevealStep {
        if ticket.0 != self.generation {
            return RevealStep::Stale;
        }
        match &mut self.content {
            ModalContent::Closed => RevealStep::Stale,
            ModalContent::Device { description, .. } => {
                if description.advance() {
                    self.continue_after(TYPEWRITER_DELAY_MS)
                } else {
                    RevealStep::Done
                }
            }
            ModalContent::HowItWorks { revealed } => {
                *revealed = (*revealed + 1).min(HOW_IT_WORKS_ROWS.len());
                if *revealed < HOW_IT_WORKS_ROWS.len() {
                    self.continue_after(HOW_LINE_DELAY_MS)
                } else {
                    RevealStep::Done
                }
            }
        }
    }

    /// Close the modal. Returns the control that should regain focus.
    pub fn close(&mut self) -> Option<FocusTarget> {
        if !self.is_open() {
            return None;
        }
        self.generation += 1;
        self.content = ModalContent::Closed;
        self.return_focus.take()
    }

    /// Keyboard handler while the modal has focus. Escape closes.
    pub fn on_key_down(&mut self, key: &str) -> Option<FocusTarget> {
        if key == "Escape" { self.close() } else { None }
    }

    /// Click on the overlay. Only a click on the backdrop itself closes.
    pub fn on_overlay_click(&mut self, on_backdrop: bool) -> Option<FocusTarget> {
        if on_backdrop { self.close() } else { None }
    }

    fn continue_after(&self, delay_ms: u32) -> RevealStep {
        RevealStep::Continue { ticket: RevealTicket(self.generation), delay_ms }
    }
}
