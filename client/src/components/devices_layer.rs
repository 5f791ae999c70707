//! Interactive device icons over the pond.
//!
//! ARCHITECTURE
//! ============
//! Each device renders as a focusable button placed by percentage. Browser
//! events are forwarded to the engine's overlay state machine; the actions it
//! returns update `OverlayView` (positions, tooltips) and may open the modal.
//! Move and release are tracked on the window so a drag keeps working when
//! the pointer leaves the icon.

use leptos::prelude::*;

use canvas::device::Device;
#[cfg(feature = "csr")]
use canvas::input::{Button, OverlayAction};

use crate::app::EngineHandle;
#[cfg(feature = "csr")]
use crate::app::with_engine;
use crate::state::modal::ModalState;
use crate::state::overlay::OverlayView;
#[cfg(feature = "csr")]
use crate::state::overlay::HostEffect;
use crate::state::pond::PondState;
use crate::util::style::{position_style, tooltip_class};

#[cfg(feature = "csr")]
use crate::util::dom::{client_point, element_size, on_window};
#[cfg(feature = "csr")]
use gloo_timers::callback::Timeout;

/// Contexts every icon handler needs.
#[derive(Clone, Copy)]
struct LayerCtx {
    engine: EngineHandle,
    pond: RwSignal<PondState>,
    overlay: RwSignal<OverlayView>,
    modal: RwSignal<ModalState>,
}

#[cfg(feature = "csr")]
impl LayerCtx {
    /// Run an engine overlay call and apply what it returns.
    fn drive(self, call: impl FnOnce(&mut canvas::engine::Engine) -> Vec<OverlayAction>) {
        let actions = with_engine(self.engine, call).unwrap_or_default();
        if actions.is_empty() {
            return;
        }
        let effects = self.overlay.try_update(|o| o.apply(actions)).unwrap_or_default();
        for effect in effects {
            match effect {
                HostEffect::OpenModal(id) => {
                    if let Some(device) = self.pond.with_untracked(|p| p.device(&id).cloned()) {
                        self.modal.update(|m| m.open_device(&device));
                    }
                }
                HostEffect::ScheduleClickReset => {
                    let engine = self.engine;
                    Timeout::new(0, move || {
                        with_engine(engine, canvas::engine::Engine::reset_click_suppression);
                    })
                    .forget();
                }
            }
        }
    }
}

/// Overlay layer holding one icon per device.
#[component]
pub fn DevicesLayer() -> impl IntoView {
    let ctx = LayerCtx {
        engine: expect_context::<EngineHandle>(),
        pond: expect_context::<RwSignal<PondState>>(),
        overlay: expect_context::<RwSignal<OverlayView>>(),
        modal: expect_context::<RwSignal<ModalState>>(),
    };
    let layer_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let devices = ctx.pond.with(|p| p.devices.clone());
        ctx.overlay.update(|o| o.reset(&devices));
    });

    #[cfg(feature = "csr")]
    {
        on_window("pointermove", move |ev: web_sys::PointerEvent| {
            ctx.drive(|e| e.on_pointer_move(client_point(&ev)));
        });
        on_window("pointerup", move |_: web_sys::PointerEvent| {
            ctx.drive(canvas::engine::Engine::on_pointer_up);
        });
    }

    view! {
        <div class="devices-layer" node_ref=layer_ref>
            <For
                each=move || ctx.pond.with(|p| p.devices.clone())
                key=|device| device.id.clone()
                let:device
            >
                <DeviceIcon device=device ctx=ctx layer_ref=layer_ref />
            </For>
        </div>
    }
}

#[component]
fn DeviceIcon(device: Device, ctx: LayerCtx, layer_ref: NodeRef<leptos::html::Div>) -> impl IntoView {
    let id = StoredValue::new(device.id.clone());
    let name = device.name.clone();
    let icon = device.kind.icon_path();

    let style = move || id.with_value(|id| ctx.overlay.with(|o| o.position(id).map(position_style)).unwrap_or_default());
    let tip_class = move || id.with_value(|id| tooltip_class(ctx.overlay.with(|o| o.tooltip_visible(id))));

    let on_enter = move |_: leptos::ev::PointerEvent| {
        #[cfg(feature = "csr")]
        id.with_value(|id| ctx.drive(|e| e.on_device_enter(id)));
    };
    let on_leave = move |_: leptos::ev::PointerEvent| {
        #[cfg(feature = "csr")]
        id.with_value(|id| ctx.drive(|e| e.on_device_leave(id)));
    };
    let on_focus = move |_: leptos::ev::FocusEvent| {
        #[cfg(feature = "csr")]
        id.with_value(|id| ctx.drive(|e| e.on_device_focus(id)));
    };
    let on_blur = move |_: leptos::ev::FocusEvent| {
        #[cfg(feature = "csr")]
        id.with_value(|id| ctx.drive(|e| e.on_device_blur(id)));
    };
    let on_pointer_down = move |ev: leptos::ev::PointerEvent| {
        #[cfg(feature = "csr")]
        {
            let button = Button::from_dom(ev.button());
            if button == Button::Primary {
                ev.prevent_default();
            }
            let Some(layer) = layer_ref.get_untracked() else {
                return;
            };
            let overlay = element_size(&layer);
            let client = client_point(&ev);
            id.with_value(|id| ctx.drive(|e| e.on_device_pointer_down(id, button, client, overlay)));
        }
        #[cfg(not(feature = "csr"))]
        let _ = (ev, layer_ref);
    };
    let on_click = move |ev: leptos::ev::MouseEvent| {
        #[cfg(feature = "csr")]
        {
            if with_engine(ctx.engine, |e| e.core.overlay.is_click_suppressed()).unwrap_or(false) {
                ev.prevent_default();
            }
            id.with_value(|id| ctx.drive(|e| e.on_device_click(id)));
        }
        #[cfg(not(feature = "csr"))]
        let _ = ev;
    };

    view! {
        <button
            class="device-icon"
            type="button"
            data-id=device.id.clone()
            aria-label=name.clone()
            style=style
            on:pointerenter=on_enter
            on:pointerleave=on_leave
            on:focus=on_focus
            on:blur=on_blur
            on:pointerdown=on_pointer_down
            on:click=on_click
        >
            <img src=icon alt=name.clone() decoding="async" draggable="false" />
            <div class=tip_class role="tooltip">{name.clone()}</div>
        </button>
    }
}
