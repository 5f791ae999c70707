//! Bridge component between the `<canvas>` element and `canvas::engine::Engine`.
//!
//! ARCHITECTURE
//! ============
//! Mounts the engine once the element exists, keeps its backing size in step
//! with the displayed size, resolves the sprites in the background, and drives
//! the animation-frame loop. The loop runs for the lifetime of the page; the
//! engine itself skips simulation while the document is hidden.

use leptos::prelude::*;

use crate::app::EngineHandle;
#[cfg(feature = "csr")]
use crate::app::with_engine;
use crate::state::pond::PondState;

#[cfg(feature = "csr")]
use canvas::asset::{AssetKind, HtmlImageLoader, resolve};
#[cfg(feature = "csr")]
use canvas::engine::Engine;
#[cfg(feature = "csr")]
use crate::util::dom::{animation_loop, now_ms, on_window, page_visible};

#[cfg(feature = "csr")]
fn sync_size(engine: &mut Engine, canvas: &web_sys::HtmlCanvasElement) {
    engine.resize(f64::from(canvas.client_width()), f64::from(canvas.client_height()));
}

#[cfg(feature = "csr")]
fn load_sprites(engine: EngineHandle) {
    for kind in AssetKind::ALL {
        leptos::task::spawn_local(async move {
            let slot = resolve(&HtmlImageLoader, kind).await;
            if slot.image().is_none() {
                log::warn!("no sprite available for {kind:?}, using fallback");
            }
            with_engine(engine, |e| e.set_asset(kind, slot));
        });
    }
}

/// Full-bleed pond canvas.
#[component]
pub fn PondCanvas() -> impl IntoView {
    let pond = expect_context::<RwSignal<PondState>>();
    let engine = expect_context::<EngineHandle>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "csr")]
    Effect::new(move || {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if engine.with_value(Option::is_some) {
            return;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seed = now_ms() as u64;
        let mut instance = match Engine::new(canvas.clone(), seed) {
            Ok(instance) => instance,
            Err(e) => {
                log::error!("pond canvas unavailable: {e:?}");
                return;
            }
        };
        sync_size(&mut instance, &canvas);
        instance.load_devices(pond.with_untracked(|p| p.devices.clone()));
        engine.set_value(Some(instance));

        load_sprites(engine);

        let canvas_for_resize = canvas.clone();
        on_window("resize", move |_: web_sys::Event| {
            with_engine(engine, |e| sync_size(e, &canvas_for_resize));
        });

        animation_loop(move |ts| {
            if let Some(Err(e)) = with_engine(engine, |e| e.frame(ts, page_visible())) {
                log::error!("frame failed: {e:?}");
            }
        });
    });

    // Later device loads replace the scene's layout.
    #[cfg(feature = "csr")]
    Effect::new(move || {
        let devices = pond.with(|p| p.devices.clone());
        with_engine(engine, |e| e.load_devices(devices));
    });

    #[cfg(not(feature = "csr"))]
    let _ = (pond, engine);

    view! {
        <canvas class="pond-canvas" node_ref=canvas_ref aria-hidden="true">
            "Your browser does not support canvas."
        </canvas>
    }
}
