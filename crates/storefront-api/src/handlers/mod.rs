//! HTTP request handlers.

pub mod admin;
pub mod health;
pub mod navigation;
pub mod session;
pub mod settings;
