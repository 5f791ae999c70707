//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `style` holds pure formatting helpers used by the views and tested natively.
//! `dom` isolates the browser calls (clock, visibility, focus, listeners) and
//! only exists in the `csr` build.

#[cfg(feature = "csr")]
pub mod dom;
pub mod style;
