//! # storefront-entity
//!
//! Domain entities shared by the access layer and its collaborators.

pub mod settings;
pub mod user;

pub use settings::SiteSettings;
pub use user::{ResolvedSession, Role};
