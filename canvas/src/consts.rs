//! Shared numeric constants for the canvas crate.

// ── Frame loop ──────────────────────────────────────────────────

/// Upper bound on the elapsed time fed into one simulation step, in ms.
pub const MAX_FRAME_DT_MS: f64 = 32.0;

/// Particle motion and fade are expressed per tick of this many ms.
pub const PARTICLE_TICK_MS: f64 = 16.0;

// ── Wanderers ───────────────────────────────────────────────────

/// Number of lobsters spawned at startup.
pub const LOBSTER_COUNT: usize = 12;

/// Lobster cruising speed in canvas widths per second.
pub const LOBSTER_SPEED: f64 = 0.035;

/// Lobster sprite edge length in pixels.
pub const LOBSTER_SIZE_PX: f64 = 44.0;

/// Per-update velocity smoothing factor. Not scaled by elapsed time.
pub const WANDER_SMOOTHING: f64 = 0.04;

/// Vertical component of a new heading is damped by this factor.
pub const WANDER_VERTICAL_BIAS: f64 = 0.3;

/// Heading resample interval bounds, in ms.
pub const WANDER_RETARGET_MIN_MS: f64 = 2000.0;
pub const WANDER_RETARGET_MAX_MS: f64 = 6000.0;

/// Normalized water band the wanderers are confined to.
pub const WANDER_X_MIN: f64 = 0.05;
pub const WANDER_X_MAX: f64 = 0.95;
pub const WANDER_Y_MIN: f64 = 0.35;
pub const WANDER_Y_MAX: f64 = 0.85;

// ── Particles ───────────────────────────────────────────────────

/// Chance of spawning one bubble per frame while the aerator runs.
pub const BUBBLE_SPAWN_CHANCE: f64 = 0.35;

/// Alpha lost per particle tick.
pub const BUBBLE_FADE_PER_TICK: f64 = 0.005;
pub const FEED_FADE_PER_TICK: f64 = 0.004;

/// Feed burst sizes.
pub const FEED_BURST_MANUAL: usize = 22;
pub const FEED_BURST_AUTOMATIC: usize = 18;

// ── Overlay ─────────────────────────────────────────────────────

/// Pointer travel (px, either axis) that turns a press into a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Percentage bounds for dragged devices.
pub const DEVICE_PCT_MIN: f64 = 2.0;
pub const DEVICE_PCT_MAX: f64 = 98.0;
pub const FEEDER_PCT_X_MIN: f64 = -20.0;
pub const FEEDER_PCT_X_MAX: f64 = 120.0;
pub const FEEDER_PCT_Y_MIN: f64 = -30.0;
pub const FEEDER_PCT_Y_MAX: f64 = 120.0;

// ── Dashboard ───────────────────────────────────────────────────

/// Dashboard polling period, in ms.
pub const POLL_INTERVAL_MS: f64 = 4000.0;

/// Feeder countdown reset value and decrement per tick, in minutes.
pub const FEEDER_RESET_MINS: u32 = 60;
pub const FEEDER_STEP_MINS: u32 = 10;

/// Auto aerator switches on below this dissolved-oxygen reading (mg/L).
pub const DO_THRESHOLD: f64 = 6.0;

/// DO assumed when no DO card exists.
pub const DO_FALLBACK: f64 = 7.0;

/// Numeric samples retained per dashboard card.
pub const CARD_HISTORY_LEN: usize = 32;

/// How long the Feed Now button pulses, in ms.
pub const FEED_PULSE_MS: u32 = 400;

// ── Modal ───────────────────────────────────────────────────────

/// Delay between revealed description characters, in ms.
pub const TYPEWRITER_DELAY_MS: u32 = 14;

/// Delay between revealed how-it-works rows, in ms.
pub const HOW_LINE_DELAY_MS: u32 = 140;
