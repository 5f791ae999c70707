//! Reactive client state shared through Leptos context.
//!
//! DESIGN
//! ======
//! Each struct here wraps a plain model from the `canvas` crate (or plain data)
//! and is provided as an `RwSignal` by `App`. Components read and update these
//! signals; the imperative scene engine is held separately and only receives
//! the side effects the models emit.

pub mod dashboard;
pub mod modal;
pub mod overlay;
pub mod pond;
