//! Route access policy configuration.
//!
//! Roles are kept as strings here; `storefront-auth` parses them when it
//! builds the policy table and rejects anything it does not recognize.

use serde::{Deserialize, Serialize};

/// A single route prefix and the minimum role it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Route prefix, e.g. `/admin/products`.
    pub prefix: String,
    /// Required role: `"guest"`, `"user"` or `"admin"`.
    pub role: String,
}

impl RouteRule {
    /// Creates a rule from borrowed parts.
    pub fn new(prefix: &str, role: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            role: role.to_string(),
        }
    }
}

/// Access control configuration shared by every enforcement point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Prefixes gated at the edge before any handler runs.
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
    /// Route → required role matrix.
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteRule>,
    /// Sign-in page used for missing or invalid credentials.
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
    /// Landing page used when a signed-in role is insufficient.
    #[serde(default = "default_home_path")]
    pub home_path: String,
    /// Path of the session introspection endpoint.
    #[serde(default = "default_introspection_path")]
    pub introspection_path: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: default_protected_prefixes(),
            routes: default_routes(),
            sign_in_path: default_sign_in_path(),
            home_path: default_home_path(),
            introspection_path: default_introspection_path(),
        }
    }
}

fn default_protected_prefixes() -> Vec<String> {
    vec!["/admin".to_string(), "/api/admin".to_string()]
}

fn default_routes() -> Vec<RouteRule> {
    vec![
        RouteRule::new("/admin", "admin"),
        RouteRule::new("/admin/products", "admin"),
        RouteRule::new("/admin/orders", "admin"),
        RouteRule::new("/admin/customers", "admin"),
        RouteRule::new("/admin/addproducts", "admin"),
        RouteRule::new("/admin/settings", "admin"),
        RouteRule::new("/api/admin", "admin"),
        RouteRule::new("/account", "user"),
        RouteRule::new("/", "guest"),
        RouteRule::new("/cart", "guest"),
        RouteRule::new("/checkout", "guest"),
        RouteRule::new("/auth", "guest"),
        RouteRule::new("/products", "guest"),
    ]
}

fn default_sign_in_path() -> String {
    "/auth".to_string()
}

fn default_home_path() -> String {
    "/".to_string()
}

fn default_introspection_path() -> String {
    "/api/auth/session".to_string()
}
