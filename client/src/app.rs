//! Root component for the pond page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides every shared signal as context, owns the scene engine
//! handle, and starts the one-time device fetch. Child components bind those
//! to the DOM.

use leptos::prelude::*;

use canvas::engine::Engine;

use crate::components::dashboard_panel::DashboardPanel;
use crate::components::device_modal::DeviceModal;
use crate::components::devices_layer::DevicesLayer;
use crate::components::pond_canvas::PondCanvas;
use crate::state::dashboard::DashboardState;
use crate::state::modal::ModalState;
use crate::state::overlay::OverlayView;
use crate::state::pond::PondState;
use crate::util::style::HOW_BUTTON_ID;

/// Handle to the scene engine. Empty until the canvas element mounts.
pub type EngineHandle = StoredValue<Option<Engine>, LocalStorage>;

/// Run `f` against the mounted engine. Returns `None` before mount.
pub fn with_engine<R>(handle: EngineHandle, f: impl FnOnce(&mut Engine) -> R) -> Option<R> {
    handle.try_update_value(|slot| slot.as_mut().map(f)).flatten()
}

#[component]
pub fn App() -> impl IntoView {
    let pond = RwSignal::new(PondState::default());
    let overlay = RwSignal::new(OverlayView::default());
    let dashboard = RwSignal::new(DashboardState::default());
    let modal = RwSignal::new(ModalState::default());
    let engine: EngineHandle = StoredValue::new_local(None);

    provide_context(pond);
    provide_context(overlay);
    provide_context(dashboard);
    provide_context(modal);
    provide_context(engine);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_devices().await {
            Ok(devices) => {
                log::info!("loaded {} devices", devices.len());
                pond.update(|p| p.loaded(devices));
            }
            Err(e) => {
                log::error!("failed to load devices: {e}");
                pond.update(PondState::failed);
            }
        }
    });

    let on_how = move |_| modal.update(ModalState::open_how_it_works);

    view! {
        <header class="topbar">
            <h1 class="brand">"WebLobster"</h1>
            <button id=HOW_BUTTON_ID class="btn how-btn" type="button" on:click=on_how>
                "Cara Kerja"
            </button>
        </header>
        <main class="layout">
            <section class="pond">
                <PondCanvas />
                <DevicesLayer />
            </section>
            <DashboardPanel />
        </main>
        <DeviceModal />
    }
}
