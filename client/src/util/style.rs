//! Inline style, class, and selector formatting for the pond views.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::collections::VecDeque;

use canvas::geom::PercentPos;
use canvas::modal::{FocusTarget, HowRow};

/// Element id of the how-it-works header button.
pub const HOW_BUTTON_ID: &str = "howBtn";

/// Sparkline viewbox size.
pub const SPARK_WIDTH: f64 = 60.0;
pub const SPARK_HEIGHT: f64 = 16.0;

/// Absolute placement of a device icon inside the overlay.
#[must_use]
pub fn position_style(pos: PercentPos) -> String {
    format!("left: {:.2}%; top: {:.2}%;", pos.x, pos.y)
}

/// Width of a dashboard card bar. Values outside [0, 100] are clamped.
#[must_use]
pub fn bar_style(percent: f64) -> String {
    format!("width: {:.0}%;", percent.clamp(0.0, 100.0))
}

/// Tooltip class for the given visibility.
#[must_use]
pub fn tooltip_class(visible: bool) -> &'static str {
    if visible { "device-tooltip" } else { "device-tooltip hidden" }
}

/// Selector for the overlay icon of a device.
#[must_use]
pub fn icon_selector(id: &str) -> String {
    let mut escaped = String::with_capacity(id.len());
    for ch in id.chars() {
        if ch == '"' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!(".device-icon[data-id=\"{escaped}\"]")
}

/// Selector of the control that regains focus when the modal closes.
#[must_use]
pub fn focus_selector(target: &FocusTarget) -> String {
    match target {
        FocusTarget::Device(id) => icon_selector(id),
        FocusTarget::HowButton => format!("#{HOW_BUTTON_ID}"),
    }
}

/// SVG polyline points for a card history, scaled to the sample range.
/// Fewer than two samples draw nothing.
#[must_use]
pub fn sparkline_points(history: &VecDeque<f64>) -> String {
    if history.len() < 2 {
        return String::new();
    }
    let min = history.iter().copied().fold(f64::INFINITY, f64::min);
    let max = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    #[allow(clippy::cast_precision_loss)]
    let step = SPARK_WIDTH / (history.len() - 1) as f64;
    history
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let t = if span > 0.0 { (v - min) / span } else { 0.5 };
            #[allow(clippy::cast_precision_loss)]
            let x = i as f64 * step;
            format!("{:.1},{:.1}", x, SPARK_HEIGHT - t * SPARK_HEIGHT)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Class of a how-it-works row; unrevealed rows stay transparent.
#[must_use]
pub fn how_row_class(row: HowRow, revealed: bool) -> &'static str {
    match (row, revealed) {
        (HowRow::Step(_), true) => "how-step revealed",
        (HowRow::Step(_), false) => "how-step",
        (HowRow::Detail(_), true) => "how-detail revealed",
        (HowRow::Detail(_), false) => "how-detail",
        (HowRow::Arrow, true) => "arrow revealed",
        (HowRow::Arrow, false) => "arrow",
    }
}
