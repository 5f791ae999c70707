//! Page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the pond page while reading/writing shared state from
//! Leptos context providers. Those that drive the scene reach the engine
//! through the `EngineHandle` context.

pub mod dashboard_panel;
pub mod device_modal;
pub mod devices_layer;
pub mod pond_canvas;
