//! User-facing identity types.

pub mod role;
pub mod session;

pub use role::Role;
pub use session::ResolvedSession;
