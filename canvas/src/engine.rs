use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::asset::{AssetKind, AssetSlot, SceneAssets};
use crate::consts::{LOBSTER_COUNT, MAX_FRAME_DT_MS};
use crate::dashboard::DashboardAction;
use crate::device::{Device, DeviceKind, DeviceStore};
use crate::geom::{PercentPos, Point, Size};
use crate::input::{Button, OverlayAction, OverlayInput};
use crate::particles::{ParticleKind, ParticlePool};
use crate::render;
use crate::rng::{RandomSource, SeededRandom};
use crate::wander::{Lobster, spawn_school};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Core engine state: all logic that does not touch the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub devices: DeviceStore,
    pub lobsters: Vec<Lobster>,
    pub bubbles: ParticlePool,
    pub feed: ParticlePool,
    /// Aerator state as last reported by the dashboard.
    pub aerator_on: bool,
    pub overlay: OverlayInput,
    /// Canvas backing size in pixels.
    pub viewport: Size,
    last_ts: Option<f64>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            devices: DeviceStore::new(),
            lobsters: spawn_school(LOBSTER_COUNT),
            bubbles: ParticlePool::new(ParticleKind::Bubble),
            feed: ParticlePool::new(ParticleKind::Feed),
            aerator_on: false,
            overlay: OverlayInput::new(),
            viewport: Size::default(),
            last_ts: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Install the device list. Drops any dragged positions.
    pub fn load_devices(&mut self, devices: Vec<Device>) {
        self.devices.load(devices);
    }

    /// Update the canvas backing size.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    // --- Frame loop ---

    /// One animation-frame callback at timestamp `ts` (ms). The elapsed time
    /// is clamped to `[0, MAX_FRAME_DT_MS]`; the simulation only advances
    /// while the page is visible. Returns whether the scene should be drawn.
    pub fn frame(&mut self, ts: f64, visible: bool, rng: &mut impl RandomSource) -> bool {
        let dt = self.last_ts.map_or(0.0, |last| (ts - last).clamp(0.0, MAX_FRAME_DT_MS));
        self.last_ts = Some(ts);
        if !visible {
            return false;
        }
        self.advance(dt, rng);
        true
    }

    /// Advance every simulated entity by `dt_ms`: lobsters, then bubble
    /// emission and update, then feed.
    pub fn advance(&mut self, dt_ms: f64, rng: &mut impl RandomSource) {
        for lobster in &mut self.lobsters {
            lobster.update(dt_ms, self.viewport, rng);
        }
        if self.aerator_on
            && let Some(origin) = self.devices.anchor_of_kind(DeviceKind::Aerator, self.viewport)
        {
            self.bubbles.emit_bubble(origin, rng);
        }
        self.bubbles.update(dt_ms, self.viewport.height);
        self.feed.update(dt_ms, self.viewport.height);
    }

    // --- Emitters ---

    /// Burst `count` feed flakes at the first feeder. Returns `false` when
    /// there is no feeder to emit from.
    pub fn emit_feed(&mut self, count: usize, rng: &mut impl RandomSource) -> bool {
        let Some(origin) = self.devices.anchor_of_kind(DeviceKind::Feeder, self.viewport) else {
            return false;
        };
        self.feed.emit_feed_burst(origin, count, rng);
        true
    }

    pub fn set_aerator(&mut self, on: bool) {
        self.aerator_on = on;
    }

    /// Route dashboard side effects into the scene. UI-only actions are ignored.
    pub fn apply_dashboard(&mut self, actions: &[DashboardAction], rng: &mut impl RandomSource) {
        for action in actions {
            match action {
                DashboardAction::FeedBurst(count) => {
                    self.emit_feed(*count, rng);
                }
                DashboardAction::SetAerator(on) => self.set_aerator(*on),
                DashboardAction::PulseFeedButton => {}
            }
        }
    }

    // --- Overlay input ---

    pub fn on_device_enter(&mut self, id: &str) -> Vec<OverlayAction> {
        self.overlay.pointer_enter(id)
    }

    pub fn on_device_leave(&mut self, id: &str) -> Vec<OverlayAction> {
        self.overlay.pointer_leave(id)
    }

    pub fn on_device_focus(&mut self, id: &str) -> Vec<OverlayAction> {
        self.overlay.focus(id)
    }

    pub fn on_device_blur(&mut self, id: &str) -> Vec<OverlayAction> {
        self.overlay.blur(id)
    }

    /// Button pressed on a device icon. `overlay` is the overlay's bounding box.
    pub fn on_device_pointer_down(
        &mut self,
        id: &str,
        button: Button,
        client: Point,
        overlay: Size,
    ) -> Vec<OverlayAction> {
        self.overlay.pointer_down(id, button, client, overlay, &self.devices)
    }

    /// Pointer moved anywhere in the window.
    pub fn on_pointer_move(&mut self, client: Point) -> Vec<OverlayAction> {
        self.overlay.pointer_move(client, &mut self.devices)
    }

    /// Button released anywhere in the window.
    pub fn on_pointer_up(&mut self) -> Vec<OverlayAction> {
        self.overlay.pointer_up()
    }

    pub fn on_device_click(&mut self, id: &str) -> Vec<OverlayAction> {
        self.overlay.click(id)
    }

    pub fn reset_click_suppression(&mut self) {
        self.overlay.reset_click_suppression();
    }

    // --- Queries ---

    #[must_use]
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    /// Where the overlay should place a device icon.
    #[must_use]
    pub fn device_position(&self, id: &str) -> Option<PercentPos> {
        self.devices.percent_position(id)
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    assets: SceneAssets<HtmlImageElement>,
    rng: SeededRandom,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, seed: u64) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, assets: SceneAssets::default(), rng: SeededRandom::from_seed(seed), core: EngineCore::new() })
    }

    // --- Delegated data inputs ---

    pub fn load_devices(&mut self, devices: Vec<Device>) {
        self.core.load_devices(devices);
    }

    /// Install a resolved sprite.
    pub fn set_asset(&mut self, kind: AssetKind, slot: AssetSlot<HtmlImageElement>) {
        self.assets.set(kind, slot);
    }

    // --- Viewport ---

    /// Match the canvas backing store to its displayed size in CSS pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, width_css: f64, height_css: f64) {
        let width = width_css.max(0.0).floor();
        let height = height_css.max(0.0).floor();
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.core.set_viewport(Size::new(width, height));
    }

    // --- Frame loop ---

    /// Animation-frame callback: step the simulation and redraw.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn frame(&mut self, ts: f64, visible: bool) -> Result<(), JsValue> {
        if self.core.frame(ts, visible, &mut self.rng) {
            self.render()?;
        }
        Ok(())
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        render::draw(&self.ctx, &self.core, &self.assets)
    }

    // --- Delegated scene inputs ---

    pub fn apply_dashboard(&mut self, actions: &[DashboardAction]) {
        self.core.apply_dashboard(actions, &mut self.rng);
    }

    // --- Delegated overlay input ---

    pub fn on_device_enter(&mut self, id: &str) -> Vec<OverlayAction> {
        self.core.on_device_enter(id)
    }

    pub fn on_device_leave(&mut self, id: &str) -> Vec<OverlayAction> {
        self.core.on_device_leave(id)
    }

    pub fn on_device_focus(&mut self, id: &str) -> Vec<OverlayAction> {
        self.core.on_device_focus(id)
    }

    pub fn on_device_blur(&mut self, id: &str) -> Vec<OverlayAction> {
        self.core.on_device_blur(id)
    }

    pub fn on_device_pointer_down(
        &mut self,
        id: &str,
        button: Button,
        client: Point,
        overlay: Size,
    ) -> Vec<OverlayAction> {
        self.core.on_device_pointer_down(id, button, client, overlay)
    }

    pub fn on_pointer_move(&mut self, client: Point) -> Vec<OverlayAction> {
        self.core.on_pointer_move(client)
    }

    pub fn on_pointer_up(&mut self) -> Vec<OverlayAction> {
        self.core.on_pointer_up()
    }

    pub fn on_device_click(&mut self, id: &str) -> Vec<OverlayAction> {
        self.core.on_device_click(id)
    }

    pub fn reset_click_suppression(&mut self) {
        self.core.reset_click_suppression();
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.core.device(id)
    }

    #[must_use]
    pub fn device_position(&self, id: &str) -> Option<PercentPos> {
        self.core.device_position(id)
    }
}
