//! Wandering lobsters.
//!
//! Each lobster keeps a normalized position and steers toward a randomly
//! chosen heading, resampled every 2–6 seconds. Actual velocity eases toward
//! the target by a fixed factor per update; that factor is applied per call,
//! not per millisecond, so easing speed follows the frame rate.

#[cfg(test)]
#[path = "wander_test.rs"]
mod wander_test;

use std::f64::consts::PI;

use crate::consts::{
    LOBSTER_SIZE_PX, LOBSTER_SPEED, WANDER_RETARGET_MAX_MS, WANDER_RETARGET_MIN_MS, WANDER_SMOOTHING,
    WANDER_VERTICAL_BIAS, WANDER_X_MAX, WANDER_X_MIN, WANDER_Y_MAX, WANDER_Y_MIN,
};
use crate::geom::Size;
use crate::rng::RandomSource;

/// An autonomous lobster sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Lobster {
    /// Normalized horizontal position.
    pub x: f64,
    /// Normalized vertical position.
    pub y: f64,
    /// Facing: `1.0` right, `-1.0` left.
    pub dir: f64,
    /// Cruising speed in canvas widths per second.
    pub speed: f64,
    pub vx: f64,
    pub vy: f64,
    pub target_vx: f64,
    pub target_vy: f64,
    /// Milliseconds until the next heading change.
    pub change_dir_timer: f64,
    /// Sprite edge length in pixels.
    pub size: f64,
}

impl Lobster {
    /// The `index`-th lobster of the startup school, spread across the pond.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spawn(index: usize) -> Self {
        Self {
            x: 0.15 + 0.12 * (index % 6) as f64,
            y: 0.50 + 0.05 * (index % 3) as f64,
            dir: 1.0,
            speed: LOBSTER_SPEED,
            vx: 0.0,
            vy: 0.0,
            target_vx: 0.0,
            target_vy: 0.0,
            change_dir_timer: 0.0,
            size: LOBSTER_SIZE_PX,
        }
    }

    /// Advance by `dt_ms` on a canvas of the given size.
    pub fn update(&mut self, dt_ms: f64, canvas: Size, rng: &mut impl RandomSource) {
        self.change_dir_timer -= dt_ms;
        if self.change_dir_timer <= 0.0 {
            self.retarget(rng);
        }

        self.vx = lerp(self.vx, self.target_vx, WANDER_SMOOTHING);
        self.vy = lerp(self.vy, self.target_vy, WANDER_SMOOTHING);

        if canvas.is_drawable() {
            // Both axes scale by width; the vertical bias is already in target_vy.
            let px_per_sec = self.speed * canvas.width;
            let dx = self.vx * px_per_sec * (dt_ms / 1000.0);
            let dy = self.vy * px_per_sec * (dt_ms / 1000.0);
            self.x += dx / canvas.width;
            self.y += dy / canvas.height;
        }

        self.x = self.x.clamp(WANDER_X_MIN, WANDER_X_MAX);
        self.y = self.y.clamp(WANDER_Y_MIN, WANDER_Y_MAX);
    }

    fn retarget(&mut self, rng: &mut impl RandomSource) {
        self.change_dir_timer = rng.range(WANDER_RETARGET_MIN_MS, WANDER_RETARGET_MAX_MS);
        let angle = rng.range(-PI, PI);
        self.target_vx = angle.cos();
        self.target_vy = angle.sin() * WANDER_VERTICAL_BIAS;
        self.dir = if self.target_vx >= 0.0 { 1.0 } else { -1.0 };
    }
}

/// Spawn the startup school of `count` lobsters.
#[must_use]
pub fn spawn_school(count: usize) -> Vec<Lobster> {
    (0..count).map(Lobster::spawn).collect()
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
