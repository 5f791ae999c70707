//! Bubble and feed particle pools.
//!
//! Particles live in pixel space. Motion and fade are expressed per 16 ms
//! tick and scaled by the real elapsed time, so a 32 ms frame moves a
//! particle twice as far as a 16 ms one. A particle leaves its pool the first
//! update where its alpha reaches zero or it crosses the kind's exit edge
//! (top for bubbles, bottom for feed).

#[cfg(test)]
#[path = "particles_test.rs"]
mod particles_test;

use crate::consts::{BUBBLE_FADE_PER_TICK, BUBBLE_SPAWN_CHANCE, FEED_FADE_PER_TICK, PARTICLE_TICK_MS};
use crate::geom::Point;
use crate::rng::RandomSource;

/// Which flavour of particle a pool holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Rises from the aerator.
    Bubble,
    /// Sinks from the feeder.
    Feed,
}

impl ParticleKind {
    /// Alpha lost per 16 ms tick.
    #[must_use]
    pub fn fade_per_tick(self) -> f64 {
        match self {
            Self::Bubble => BUBBLE_FADE_PER_TICK,
            Self::Feed => FEED_FADE_PER_TICK,
        }
    }

    /// Flat colour drawn when the sprite is unavailable.
    #[must_use]
    pub fn fallback_color(self) -> &'static str {
        match self {
            Self::Bubble => "#cfe9ff",
            Self::Feed => "#8b5a2b",
        }
    }

    /// Whether a particle at `y` has left a canvas of height `canvas_h`.
    #[must_use]
    pub fn is_out_of_bounds(self, y: f64, canvas_h: f64) -> bool {
        match self {
            Self::Bubble => y < 0.0,
            Self::Feed => y > canvas_h,
        }
    }
}

/// A short-lived sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Pixels per 16 ms tick.
    pub vx: f64,
    /// Pixels per 16 ms tick; negative is up.
    pub vy: f64,
    pub alpha: f64,
    /// Sprite edge length in pixels.
    pub size: f64,
}

/// A pool of particles of one kind.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    kind: ParticleKind,
    particles: Vec<Particle>,
}

impl ParticlePool {
    #[must_use]
    pub fn new(kind: ParticleKind) -> Self {
        Self { kind, particles: Vec::new() }
    }

    #[must_use]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Add a particle as-is.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Maybe spawn one bubble at `origin`. Returns whether one was spawned.
    pub fn emit_bubble(&mut self, origin: Point, rng: &mut impl RandomSource) -> bool {
        if !rng.chance(BUBBLE_SPAWN_CHANCE) {
            return false;
        }
        let particle = Particle {
            x: origin.x + rng.range(-5.0, 5.0),
            y: origin.y + rng.range(-2.0, 2.0),
            vx: rng.range(-0.25, 0.25),
            vy: rng.range(-0.7, -0.35),
            alpha: 1.0,
            size: rng.range(16.0, 24.0),
        };
        self.particles.push(particle);
        true
    }

    /// Spawn `count` feed flakes around `origin`.
    pub fn emit_feed_burst(&mut self, origin: Point, count: usize, rng: &mut impl RandomSource) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle {
                x: origin.x + rng.range(-6.0, 6.0),
                y: origin.y + rng.range(-4.0, 4.0),
                vx: rng.range(-0.3, 0.3),
                vy: rng.range(0.6, 1.2),
                alpha: 1.0,
                size: rng.range(6.0, 10.0),
            };
            self.particles.push(particle);
        }
    }

    /// Integrate, fade, and cull. Returns how many particles were removed.
    pub fn update(&mut self, dt_ms: f64, canvas_h: f64) -> usize {
        let ticks = dt_ms.max(0.0) / PARTICLE_TICK_MS;
        let fade = self.kind.fade_per_tick() * ticks;
        let kind = self.kind;
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            p.x += p.vx * ticks;
            p.y += p.vy * ticks;
            p.alpha -= fade;
            !(kind.is_out_of_bounds(p.y, canvas_h) || p.alpha <= 0.0)
        });
        before - self.particles.len()
    }
}
