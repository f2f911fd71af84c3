//! The route → required-role matrix.
//!
//! Matching works on whole path segments: `/cart` covers `/cart` and
//! `/cart/42`, never `/cartography`. The longest matching prefix wins and
//! an unmatched path is open to guests. The root entry `/` only covers the
//! root path itself, so it never shadows unmatched routes.
//!
//! Paths are matched on their literal segments. A path carrying a `.` or
//! `..` segment, plain or percent-encoded, is never resolved: it requires
//! `admin` and counts as protected, because the router downstream matches
//! the raw path and would disagree with any resolution done here.

use std::collections::HashSet;

use percent_encoding::percent_decode_str;

use storefront_core::config::AccessConfig;
use storefront_core::error::AppError;
use storefront_entity::user::Role;

/// One configured route prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PolicyEntry {
    /// Prefix as configured, e.g. `/admin/products`.
    prefix: String,
    /// Literal segments of the prefix.
    segments: Vec<String>,
    /// Minimum role for any path under the prefix.
    role: Role,
}

impl PolicyEntry {
    fn matches(&self, path: &[&str]) -> bool {
        if self.segments.is_empty() {
            return path.is_empty();
        }
        path.len() >= self.segments.len()
            && self.segments.iter().zip(path).all(|(a, b)| a == b)
    }
}

/// Immutable route access policy shared by every enforcement point.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    /// Entries, most specific first.
    entries: Vec<PolicyEntry>,
    /// Edge-gated prefixes, as segments.
    protected: Vec<Vec<String>>,
}

impl RoutePolicy {
    /// Builds the policy from access configuration.
    pub fn from_config(config: &AccessConfig) -> Result<Self, AppError> {
        let mut rules = Vec::with_capacity(config.routes.len());
        for rule in &config.routes {
            let role = rule.role.parse::<Role>().map_err(|e: AppError| {
                AppError::configuration(format!("route '{}': {}", rule.prefix, e.message))
            })?;
            rules.push((rule.prefix.as_str(), role));
        }
        Self::new(
            rules,
            config.protected_prefixes.iter().map(String::as_str),
        )
    }

    /// Builds the policy from `(prefix, role)` rules and the edge-gated prefixes.
    ///
    /// Fails on duplicate or relative prefixes, on prefixes with dot
    /// segments, and on a protected prefix
    /// whose requirement would resolve to `guest`. A protected prefix with no
    /// rule of its own requires `admin`.
    pub fn new<'a>(
        rules: impl IntoIterator<Item = (&'a str, Role)>,
        protected_prefixes: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for (prefix, role) in rules {
            let segments = prefix_segments(prefix)?;
            if !seen.insert(segments.clone()) {
                return Err(AppError::configuration(format!(
                    "route prefix '{prefix}' is configured more than once"
                )));
            }
            entries.push(PolicyEntry {
                prefix: prefix.to_string(),
                segments,
                role,
            });
        }

        let mut protected = Vec::new();
        for prefix in protected_prefixes {
            let segments = prefix_segments(prefix)?;
            if segments.is_empty() {
                return Err(AppError::configuration(
                    "the root path cannot be a protected prefix",
                ));
            }
            if seen.insert(segments.clone()) {
                entries.push(PolicyEntry {
                    prefix: prefix.to_string(),
                    segments: segments.clone(),
                    role: Role::Admin,
                });
            }
            protected.push(segments);
        }

        entries.sort_by(|a, b| b.segments.len().cmp(&a.segments.len()));
        let policy = Self { entries, protected };

        for segments in &policy.protected {
            let path = format!("/{}", segments.join("/"));
            if policy.required_role(&path) == Role::Guest {
                return Err(AppError::configuration(format!(
                    "protected prefix '{path}' resolves to guest access"
                )));
            }
        }

        Ok(policy)
    }

    /// Returns the minimum role required for `path`.
    pub fn required_role(&self, path: &str) -> Role {
        if has_dot_segments(path) {
            return Role::Admin;
        }
        let segments = path_segments(path);
        self.entries
            .iter()
            .find(|entry| entry.matches(&segments))
            .map(|entry| entry.role)
            .unwrap_or(Role::Guest)
    }

    /// Decides whether `role` (absent when there is no valid credential) may open `path`.
    pub fn can_access(&self, role: Option<Role>, path: &str) -> bool {
        role_satisfies(role, self.required_role(path))
    }

    /// Whether `path` sits under an edge-gated prefix.
    ///
    /// Paths with dot segments always count as protected.
    pub fn is_protected(&self, path: &str) -> bool {
        if has_dot_segments(path) {
            return true;
        }
        let segments = path_segments(path);
        self.protected.iter().any(|prefix| {
            segments.len() >= prefix.len() && prefix.iter().zip(&segments).all(|(a, b)| a == b)
        })
    }

    /// Iterates over configured prefixes and their roles, most specific first.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Role)> {
        self.entries.iter().map(|e| (e.prefix.as_str(), e.role))
    }
}

/// The access decision table.
///
/// | required | role        | allowed |
/// |----------|-------------|---------|
/// | guest    | any / none  | yes     |
/// | other    | none        | no      |
/// | other    | admin       | yes     |
/// | user     | user        | yes     |
/// | admin    | user        | no      |
/// | other    | guest       | no      |
pub fn role_satisfies(role: Option<Role>, required: Role) -> bool {
    match (required, role) {
        (Role::Guest, _) => true,
        (_, None) => false,
        (_, Some(Role::Admin)) => true,
        (Role::User, Some(Role::User)) => true,
        _ => false,
    }
}

/// Splits a request path into its literal segments.
///
/// Drops the query, the fragment and empty segments. Dot segments are kept
/// as they are; see [`has_dot_segments`].
pub fn path_segments(path: &str) -> Vec<&str> {
    strip_query(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Whether any segment of `path` is `.` or `..`, including the
/// percent-encoded spellings such as `%2e%2E`.
pub fn has_dot_segments(path: &str) -> bool {
    strip_query(path).split('/').any(|segment| {
        let decoded = percent_decode_str(segment).decode_utf8_lossy();
        decoded == "." || decoded == ".."
    })
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or_default()
}

fn prefix_segments(prefix: &str) -> Result<Vec<String>, AppError> {
    if !prefix.starts_with('/') {
        return Err(AppError::configuration(format!(
            "route prefix '{prefix}' must start with '/'"
        )));
    }
    if has_dot_segments(prefix) {
        return Err(AppError::configuration(format!(
            "route prefix '{prefix}' must not contain '.' or '..' segments"
        )));
    }
    Ok(path_segments(prefix).into_iter().map(str::to_string).collect())
}
