//! Device detail and how-it-works modal.
//!
//! ARCHITECTURE
//! ============
//! Renders `ModalState` and owns the single reveal timer. Whenever the pending
//! step changes the previous `Timeout` is dropped, which cancels it, and a new
//! one is armed for the latest ticket. Closing moves focus back to the control
//! that opened the modal.

use leptos::prelude::*;

use canvas::modal::{HOW_IT_WORKS_ROWS, ModalContent};
#[cfg(feature = "csr")]
use canvas::modal::FocusTarget;

use crate::state::modal::ModalState;
use crate::util::style::how_row_class;

#[cfg(feature = "csr")]
use crate::util::dom::focus_selector;
#[cfg(feature = "csr")]
use crate::util::style;
#[cfg(feature = "csr")]
use gloo_timers::callback::Timeout;
#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
fn restore_focus(target: Option<FocusTarget>) {
    if let Some(target) = target {
        focus_selector(&style::focus_selector(&target));
    }
}

#[component]
pub fn DeviceModal() -> impl IntoView {
    let modal = expect_context::<RwSignal<ModalState>>();
    let dialog_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "csr")]
    {
        let reveal_timer = Rc::new(RefCell::new(None::<Timeout>));
        Effect::new(move || {
            let next = modal.with(ModalState::pending).map(|(ticket, delay_ms)| {
                Timeout::new(delay_ms, move || modal.update(|m| m.tick(ticket)))
            });
            *reveal_timer.borrow_mut() = next;
        });

        // Focus the dialog whenever it opens so Escape reaches it.
        Effect::new(move || {
            if modal.with(|m| m.modal.is_open())
                && let Some(dialog) = dialog_ref.get()
                && let Err(e) = dialog.focus()
            {
                log::warn!("modal focus failed: {e:?}");
            }
        });
    }

    let is_open = move || modal.with(|m| m.modal.is_open());
    let title = move || modal.with(|m| m.modal.title().to_owned());
    let photo = move || modal.with(|m| m.modal.photo().map(str::to_owned));
    let body_class = move || {
        if modal.with(|m| m.modal.is_text_only()) { "modal-body modal-body--text-only" } else { "modal-body" }
    };

    let on_overlay_click = move |ev: leptos::ev::MouseEvent| {
        #[cfg(feature = "csr")]
        {
            let on_backdrop = match (ev.target(), ev.current_target()) {
                (Some(target), Some(current)) => target == current,
                _ => false,
            };
            if on_backdrop {
                restore_focus(modal.try_update(|m| m.on_overlay_click(true)).flatten());
            }
        }
        #[cfg(not(feature = "csr"))]
        let _ = ev;
    };
    let on_key_down = move |ev: leptos::ev::KeyboardEvent| {
        #[cfg(feature = "csr")]
        {
            if ev.key() == "Escape" {
                ev.prevent_default();
                restore_focus(modal.try_update(|m| m.on_key_down("Escape")).flatten());
            }
        }
        #[cfg(not(feature = "csr"))]
        let _ = ev;
    };
    let on_close = move |_| {
        #[cfg(feature = "csr")]
        restore_focus(modal.try_update(ModalState::close).flatten());
        #[cfg(not(feature = "csr"))]
        modal.update(|m| {
            m.close();
        });
    };

    let description = move || {
        modal.with(|m| match m.modal.content() {
            ModalContent::Device { description, .. } => {
                let class = if description.is_typing() { "modal-desc typing" } else { "modal-desc" };
                view! { <p class=class>{description.visible().to_owned()}</p> }.into_any()
            }
            ModalContent::HowItWorks { revealed } => {
                let rows = HOW_IT_WORKS_ROWS
                    .iter()
                    .enumerate()
                    .map(|(i, row)| view! { <div class=how_row_class(*row, i < *revealed)>{row.text()}</div> })
                    .collect_view();
                view! { <div class="modal-desc how-rows">{rows}</div> }.into_any()
            }
            ModalContent::Closed => ().into_any(),
        })
    };

    view! {
        <div
            class="modal-overlay"
            aria-hidden=move || (!is_open()).to_string()
            class:open=is_open
            on:click=on_overlay_click
            on:keydown=on_key_down
        >
            <div class="modal" role="dialog" aria-modal="true" tabindex="-1" node_ref=dialog_ref>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button class="btn modal-close" type="button" aria-label="Tutup" on:click=on_close>
                        "×"
                    </button>
                </div>
                <div class=body_class>
                    {move || photo().map(|src| view! { <img class="modal-photo" src=src alt="" /> })}
                    {description}
                </div>
            </div>
        </div>
    }
}
