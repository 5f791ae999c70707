//! Device model: pond devices, their kinds, and the session layout store.
//!
//! Devices arrive once as a JSON array (`data/devices.json`) and never change
//! afterwards. The only mutable layout state is the session override map that
//! dragging writes into. Both the overlay (icon placement) and the particle
//! emitters (bubble/feed anchors) resolve positions through [`DeviceStore`],
//! so a dragged aerator immediately bubbles from its new spot.

#[cfg(test)]
#[path = "device_test.rs"]
mod device_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEVICE_PCT_MAX, DEVICE_PCT_MIN, FEEDER_PCT_X_MAX, FEEDER_PCT_X_MIN, FEEDER_PCT_Y_MAX, FEEDER_PCT_Y_MIN,
};
use crate::geom::{PercentPos, Point, Size};

/// Identifier of a device as given in the data file.
pub type DeviceId = String;

/// The kind of a device. Unknown kinds deserialize as [`DeviceKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Feeder,
    Pump,
    Aerator,
    Temp,
    Ph,
    Do,
    Level,
    #[serde(other)]
    Other,
}

impl DeviceKind {
    /// Pixel-art icon shown in the overlay and on dashboard cards.
    #[must_use]
    pub fn icon_path(self) -> &'static str {
        match self {
            Self::Feeder => "assets/web/feeder_pixel.png",
            Self::Pump => "assets/web/pump_pixel.png",
            Self::Aerator => "assets/web/aerator_pixel.png",
            Self::Temp => "assets/web/temp_pixel.png",
            Self::Ph => "assets/web/ph_pixel.png",
            Self::Do => "assets/web/do_pixel.png",
            Self::Level => "assets/web/level_pixel.png",
            Self::Other => "assets/web/device_pixel.png",
        }
    }

    /// Metric label shown beside a dashboard reading.
    #[must_use]
    pub fn metric_label(self) -> &'static str {
        match self {
            Self::Temp => "Suhu",
            Self::Ph => "pH",
            Self::Do => "DO",
            Self::Level => "Level Air",
            Self::Aerator => "Aerasi",
            Self::Pump => "Sirkulasi",
            Self::Feeder => "Feeding",
            Self::Other => "Status",
        }
    }

    /// Dashboard ordering bucket: feeder first, aerator second, pump last.
    #[must_use]
    pub fn dashboard_priority(self) -> u8 {
        match self {
            Self::Feeder => 0,
            Self::Aerator => 1,
            Self::Pump => 99,
            _ => 10,
        }
    }

    /// Whether the dashboard card carries a fill bar.
    #[must_use]
    pub fn has_bar(self) -> bool {
        !matches!(self, Self::Feeder | Self::Pump)
    }

    /// Clamp a dragged percentage position to this kind's allowed area.
    ///
    /// Feeders may hang partly outside the overlay; everything else stays
    /// inside a 2% margin.
    #[must_use]
    pub fn clamp_percent(self, pos: PercentPos) -> PercentPos {
        match self {
            Self::Feeder => PercentPos {
                x: pos.x.clamp(FEEDER_PCT_X_MIN, FEEDER_PCT_X_MAX),
                y: pos.y.clamp(FEEDER_PCT_Y_MIN, FEEDER_PCT_Y_MAX),
            },
            _ => PercentPos {
                x: pos.x.clamp(DEVICE_PCT_MIN, DEVICE_PCT_MAX),
                y: pos.y.clamp(DEVICE_PCT_MIN, DEVICE_PCT_MAX),
            },
        }
    }
}

/// A device as stored in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique identifier.
    pub id: DeviceId,
    /// Display name (tooltip, card title, modal title).
    pub name: String,
    /// Device kind.
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    /// Normalized horizontal base position.
    pub x: f64,
    /// Normalized vertical base position.
    pub y: f64,
    /// Free-form description revealed in the detail modal.
    #[serde(default)]
    pub description: String,
    /// Photo URL shown in the detail modal.
    #[serde(default)]
    pub photo: String,
}

impl Device {
    /// Base position in percent, with the normalized coordinates clamped
    /// into `0..1`.
    #[must_use]
    pub fn base_position(&self) -> PercentPos {
        PercentPos::from_normalized(self.x.clamp(0.0, 1.0), self.y.clamp(0.0, 1.0))
    }
}

/// Parse the device data file.
///
/// # Errors
///
/// Returns the `serde_json` error if the payload is not a JSON array of devices.
pub fn parse_devices(json: &str) -> Result<Vec<Device>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Devices plus the session-only position overrides.
#[derive(Debug, Clone, Default)]
pub struct DeviceStore {
    devices: Vec<Device>,
    overrides: HashMap<DeviceId, PercentPos>,
}

impl DeviceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all devices. Base positions are clamped into `0..1` and any
    /// previous overrides are dropped.
    pub fn load(&mut self, devices: Vec<Device>) {
        self.devices = devices
            .into_iter()
            .map(|mut d| {
                d.x = d.x.clamp(0.0, 1.0);
                d.y = d.y.clamp(0.0, 1.0);
                d
            })
            .collect();
        self.overrides.clear();
    }

    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// First device of the given kind, in data-file order.
    #[must_use]
    pub fn first_of_kind(&self, kind: DeviceKind) -> Option<&Device> {
        self.devices.iter().find(|d| d.kind == kind)
    }

    /// Current percentage position: the override if one exists, else the base.
    #[must_use]
    pub fn percent_position(&self, id: &str) -> Option<PercentPos> {
        let device = self.get(id)?;
        Some(
            self.overrides
                .get(id)
                .copied()
                .unwrap_or_else(|| device.base_position()),
        )
    }

    /// Current position in canvas pixels.
    #[must_use]
    pub fn pixel_position(&self, id: &str, canvas: Size) -> Option<Point> {
        self.percent_position(id).map(|p| p.to_pixels(canvas))
    }

    /// Pixel position of the first device of `kind`.
    #[must_use]
    pub fn anchor_of_kind(&self, kind: DeviceKind, canvas: Size) -> Option<Point> {
        let device = self.first_of_kind(kind)?;
        self.pixel_position(&device.id, canvas)
    }

    /// Record a dragged position, clamped per device kind. Returns the stored
    /// position, or `None` for an unknown id.
    pub fn set_override(&mut self, id: &str, pos: PercentPos) -> Option<PercentPos> {
        let kind = self.get(id)?.kind;
        let clamped = kind.clamp_percent(pos);
        self.overrides.insert(id.to_owned(), clamped);
        Some(clamped)
    }

    #[must_use]
    pub fn override_for(&self, id: &str) -> Option<PercentPos> {
        self.overrides.get(id).copied()
    }
}
