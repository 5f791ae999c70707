//! Networking for the pond page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page talks to the network exactly once, to fetch the static device
//! list. Everything else is simulated locally.

pub mod api;
