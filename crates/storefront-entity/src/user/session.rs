//! Per-request projection of a verified session credential.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// The signed-in user as seen by handlers and the introspection endpoint.
///
/// Built fresh for every request from a verified credential and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSession {
    /// User identifier issued by the authentication flow.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name, when the authentication flow supplied one.
    #[serde(default)]
    pub name: Option<String>,
    /// Role carried by the credential.
    pub role: Role,
}
