//! HTTP middleware layers.

pub mod cors;
pub mod gatekeeper;
pub mod logging;
