//! Browser helpers for the pond page.
//!
//! Everything here touches `web_sys` directly and is only compiled with the
//! `csr` feature. Missing window or document objects degrade to no-ops.

use std::cell::RefCell;
use std::rc::Rc;

use canvas::geom::{Point, Size};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Wall-clock milliseconds.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Whether the document is currently visible. Defaults to visible when there
/// is no document.
pub fn page_visible() -> bool {
    web_sys::window().and_then(|w| w.document()).map_or(true, |d| !d.hidden())
}

/// Move keyboard focus to the first element matching `selector`.
pub fn focus_selector(selector: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Ok(Some(element)) = document.query_selector(selector)
        && let Ok(element) = element.dyn_into::<web_sys::HtmlElement>()
    {
        if let Err(e) = element.focus() {
            log::warn!("focus failed for {selector}: {e:?}");
        }
    }
}

/// Rendered size of an element in CSS pixels.
pub fn element_size(element: &web_sys::Element) -> Size {
    let rect = element.get_bounding_client_rect();
    Size::new(rect.width(), rect.height())
}

/// Pointer position in client coordinates.
pub fn client_point(ev: &web_sys::MouseEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Attach a window listener for the lifetime of the page.
pub fn on_window<E, F>(event: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };
    let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    match window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        Ok(()) => cb.forget(),
        Err(e) => log::error!("failed to listen for {event}: {e:?}"),
    }
}

/// Run `step` on every animation frame for the lifetime of the page.
pub fn animation_loop<F>(mut step: F)
where
    F: FnMut(f64) + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let window_for_cb = window.clone();
    *holder.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        step(ts);
        if let Some(cb) = holder_for_cb.borrow().as_ref()
            && let Err(e) = window_for_cb.request_animation_frame(cb.as_ref().unchecked_ref())
        {
            log::error!("animation frame request failed: {e:?}");
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = holder.borrow().as_ref()
        && let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref())
    {
        log::error!("animation frame request failed: {e:?}");
    }
}
