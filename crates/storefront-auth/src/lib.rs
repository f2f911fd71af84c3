//! # storefront-auth
//!
//! Route access control for the storefront and admin console.
//!
//! ## Modules
//!
//! - `token`: session credential signing and verification
//! - `policy`: the route → role matrix and per-role navigation
//! - `gate`: the edge decision for protected path prefixes
//! - `session`: server-side session resolution and access checks
//! - `error`: the access failure taxonomy
//!
//! Every enforcement point (edge gate, server resolver, client hook) reads
//! the same [`RoutePolicy`].

pub mod error;
pub mod gate;
pub mod policy;
pub mod session;
pub mod token;

pub use error::AccessError;
pub use gate::{GateOutcome, Gatekeeper};
pub use policy::{NavItem, Navigation, RoutePolicy};
pub use session::{AccessCheck, AccessDenied, AuthorizedSession, SessionResolver};
pub use token::{Claims, TokenCodec, VerificationError};
