//! # storefront-core
//!
//! Core crate for the storefront access layer. Contains configuration
//! schemas, the unified error system, and the explicit TTL cache used for
//! site-wide values.
//!
//! This crate has **no** internal dependencies on other storefront crates.

pub mod cache;
pub mod config;
pub mod error;
pub mod result;

pub use cache::TimedCache;
pub use error::AppError;
pub use result::AppResult;
