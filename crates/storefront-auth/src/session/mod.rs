//! Server-side session resolution.

pub mod resolver;

pub use resolver::{AccessCheck, AccessDenied, AuthorizedSession, SessionResolver};
