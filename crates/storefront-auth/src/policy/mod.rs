//! Route access policy and the role-aware navigation built on it.

pub mod navigation;
pub mod table;

pub use navigation::{NavItem, Navigation};
pub use table::{RoutePolicy, has_dot_segments, path_segments, role_satisfies};
