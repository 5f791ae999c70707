//! WebLobster pond page, rendered client-side with Leptos.
//!
//! ARCHITECTURE
//! ============
//! The `canvas` crate owns the scene and every interaction model. This crate
//! binds them to the DOM: `state` holds the reactive signals, `components`
//! renders them and forwards browser events, `net` fetches the device list,
//! and `util` isolates formatting and browser calls.
//!
//! Browser-only code is gated on the `csr` feature so the pure parts build and
//! test natively.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
