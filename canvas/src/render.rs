//! Rendering: draws the pond scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine and the sprite slots and produces
//! pixels and does not mutate any application state.
//!
//! Layers are drawn in a fixed order: background, lobsters, bubbles, feed.
//! Image smoothing is off everywhere to keep the pixel-art look. A sprite slot
//! that is still pending or missing falls back to a flat colour.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::asset::{AssetSlot, SceneAssets};
use crate::engine::EngineCore;
use crate::geom::Size;
use crate::particles::ParticlePool;
use crate::wander::Lobster;

/// Flat water colour while the background is unavailable.
const BACKGROUND_FALLBACK: &str = "#10324e";

/// Flat lobster colour while the sprite is unavailable.
const LOBSTER_FALLBACK: &str = "#b0413e";

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    assets: &SceneAssets<HtmlImageElement>,
) -> Result<(), JsValue> {
    let viewport = core.viewport;
    if !viewport.is_drawable() {
        return Ok(());
    }

    draw_background(ctx, viewport, &assets.background)?;
    for lobster in &core.lobsters {
        draw_lobster(ctx, lobster, viewport, &assets.lobster)?;
    }
    draw_particles(ctx, &core.bubbles, &assets.bubble)?;
    draw_particles(ctx, &core.feed, &assets.feed)?;
    Ok(())
}

// =============================================================
// Layers
// =============================================================

fn draw_background(
    ctx: &CanvasRenderingContext2d,
    viewport: Size,
    slot: &AssetSlot<HtmlImageElement>,
) -> Result<(), JsValue> {
    ctx.set_image_smoothing_enabled(false);
    match slot.image() {
        Some(image) => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, viewport.width, viewport.height)?;
        }
        None => {
            ctx.set_fill_style_str(BACKGROUND_FALLBACK);
            ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
        }
    }
    Ok(())
}

/// Lobsters are centred on their position and mirrored by facing.
fn draw_lobster(
    ctx: &CanvasRenderingContext2d,
    lobster: &Lobster,
    viewport: Size,
    slot: &AssetSlot<HtmlImageElement>,
) -> Result<(), JsValue> {
    let px = (lobster.x * viewport.width).floor();
    let py = (lobster.y * viewport.height).floor();
    let s = lobster.size;

    ctx.save();
    ctx.set_image_smoothing_enabled(false);
    ctx.translate(px, py)?;
    ctx.scale(lobster.dir, 1.0)?;
    ctx.translate(-s / 2.0, -s / 2.0)?;
    match slot.image() {
        Some(image) => ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, s, s)?,
        None => {
            ctx.set_fill_style_str(LOBSTER_FALLBACK);
            ctx.fill_rect(0.0, 0.0, s, s);
        }
    }
    ctx.restore();
    Ok(())
}

/// Particles draw from their top-left corner at whole-pixel positions.
fn draw_particles(
    ctx: &CanvasRenderingContext2d,
    pool: &ParticlePool,
    slot: &AssetSlot<HtmlImageElement>,
) -> Result<(), JsValue> {
    if pool.is_empty() {
        return Ok(());
    }
    let fallback = pool.kind().fallback_color();

    ctx.save();
    ctx.set_image_smoothing_enabled(false);
    for p in pool.particles() {
        ctx.set_global_alpha(p.alpha.clamp(0.0, 1.0));
        let (x, y, size) = (p.x.floor(), p.y.floor(), p.size.floor());
        match slot.image() {
            Some(image) => ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, size, size)?,
            None => {
                ctx.set_fill_style_str(fallback);
                ctx.fill_rect(x, y, size, size);
            }
        }
    }
    ctx.set_global_alpha(1.0);
    ctx.restore();
    Ok(())
}
