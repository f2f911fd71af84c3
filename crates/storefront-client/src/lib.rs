//! # storefront-client
//!
//! Client-side companion to the edge gate. The [`AccessHook`] asks the
//! server who is signed in, checks the current page against the shared
//! [`storefront_auth::RoutePolicy`], and navigates home when the page is
//! off limits.
//!
//! The hook is a convenience for rendering; the server-side gate and
//! resolver remain the trust boundary.

pub mod hook;
pub mod introspect;
pub mod navigator;

pub use hook::{AccessHook, AccessSnapshot, HookConfig, HookState};
pub use introspect::{HttpIntrospector, SessionIntrospector};
pub use navigator::Navigator;
