//! Pond scene engine for the WebLobster dashboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns all
//! simulation and interaction state of the pond page: wandering lobsters,
//! bubble and feed particles, the device layout with its session-only drag
//! overrides, the mock dashboard, and the modal reveal state machine. The host
//! (the Leptos client) wires DOM events and timers to these models and applies
//! the actions they return.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`device`] | Device records, kinds, and the override-aware position store |
//! | [`wander`] | Wandering lobster entities |
//! | [`particles`] | Bubble and feed particle pools |
//! | [`input`] | Device overlay interaction state machine |
//! | [`dashboard`] | Mock sensor dashboard and aerator/feeder controls |
//! | [`modal`] | Device detail and how-it-works reveal state machine |
//! | [`asset`] | Candidate-list sprite loading |
//! | [`render`] | Scene rendering to `CanvasRenderingContext2d` |
//! | [`geom`] | Pixel, percent, and normalized coordinate helpers |
//! | [`rng`] | Injectable randomness |
//! | [`consts`] | Shared numeric constants (timings, ranges, burst sizes) |

pub mod asset;
pub mod consts;
pub mod dashboard;
pub mod device;
pub mod engine;
pub mod geom;
pub mod input;
pub mod modal;
pub mod particles;
pub mod render;
pub mod rng;
pub mod wander;
