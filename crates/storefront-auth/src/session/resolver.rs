//! Server-side session resolution and route access checks.
//!
//! Used by handlers as defense-in-depth behind the edge gate: a handler
//! reached without passing the gate still checks the credential itself.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use storefront_core::config::AccessConfig;
use storefront_entity::user::{ResolvedSession, Role};

use crate::error::AccessError;
use crate::policy::RoutePolicy;
use crate::token::TokenCodec;

/// Outcome of checking a path against the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessCheck {
    /// Whether the path may be opened.
    pub allowed: bool,
    /// The signed-in user, if any.
    pub user: Option<ResolvedSession>,
    /// The user's role, if any.
    pub role: Option<Role>,
}

/// What a handler receives once access is granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizedSession {
    /// The signed-in user; `None` on guest routes visited anonymously.
    pub user: Option<ResolvedSession>,
    /// The user's role, if any.
    pub role: Option<Role>,
}

/// Access was refused; the caller must navigate to `redirect_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    /// Where to send the visitor.
    pub redirect_to: String,
    /// Why the check failed.
    pub reason: AccessError,
}

/// Reconstructs sessions from credentials and applies the route policy.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    codec: Arc<TokenCodec>,
    policy: Arc<RoutePolicy>,
    sign_in_path: String,
    home_path: String,
}

impl SessionResolver {
    /// Creates a resolver over the shared codec and policy.
    pub fn new(codec: Arc<TokenCodec>, policy: Arc<RoutePolicy>, config: &AccessConfig) -> Self {
        Self {
            codec,
            policy,
            sign_in_path: config.sign_in_path.clone(),
            home_path: config.home_path.clone(),
        }
    }

    /// Where a visitor with `role` belongs when no other destination applies.
    ///
    /// Nobody signed in goes to sign-in; customers and admins go home.
    pub fn landing_path(&self, role: Option<Role>) -> &str {
        match role {
            None | Some(Role::Guest) => &self.sign_in_path,
            Some(Role::User) | Some(Role::Admin) => &self.home_path,
        }
    }

    /// The shared route policy.
    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    /// Resolves the session carried by `credential`, reporting why it failed.
    pub fn resolve_at(
        &self,
        credential: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ResolvedSession, AccessError> {
        let token = credential
            .filter(|t| !t.is_empty())
            .ok_or(AccessError::CredentialMissing)?;
        let claims = self.codec.verify_at(token, now)?;
        Ok(claims.into())
    }

    /// Returns the current session, or `None` when unauthenticated.
    ///
    /// An absent or invalid credential is not a fault; it simply means
    /// nobody is signed in.
    pub fn current_session(&self, credential: Option<&str>) -> Option<ResolvedSession> {
        self.current_session_at(credential, Utc::now())
    }

    /// [`Self::current_session`] as of `now`.
    pub fn current_session_at(
        &self,
        credential: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<ResolvedSession> {
        match self.resolve_at(credential, now) {
            Ok(session) => Some(session),
            Err(AccessError::CredentialMissing) => None,
            Err(e) => {
                debug!(reason = e.code(), "Ignoring unusable session credential");
                None
            }
        }
    }

    /// Checks `path` against the current session without redirecting.
    pub fn check_access(&self, credential: Option<&str>, path: &str) -> AccessCheck {
        self.check_access_at(credential, path, Utc::now())
    }

    /// [`Self::check_access`] as of `now`.
    pub fn check_access_at(
        &self,
        credential: Option<&str>,
        path: &str,
        now: DateTime<Utc>,
    ) -> AccessCheck {
        let user = self.current_session_at(credential, now);
        let role = user.as_ref().map(|u| u.role);
        AccessCheck {
            allowed: self.policy.can_access(role, path),
            user,
            role,
        }
    }

    /// Grants access to `path` or denies with a redirect home.
    pub fn require_access(
        &self,
        credential: Option<&str>,
        path: &str,
    ) -> Result<AuthorizedSession, AccessDenied> {
        self.require_access_at(credential, path, Utc::now())
    }

    /// [`Self::require_access`] as of `now`.
    pub fn require_access_at(
        &self,
        credential: Option<&str>,
        path: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthorizedSession, AccessDenied> {
        let check = self.check_access_at(credential, path, now);
        if check.allowed {
            return Ok(AuthorizedSession {
                user: check.user,
                role: check.role,
            });
        }

        let required = self.policy.required_role(path);
        let reason = match check.role {
            Some(role) => AccessError::RoleMismatch { role, required },
            None => match self.resolve_at(credential, now) {
                Err(e) => e,
                Ok(_) => AccessError::CredentialMissing,
            },
        };
        debug!(path = %path, reason = reason.code(), "Server-side access check denied");

        Err(AccessDenied {
            redirect_to: self.home_path.clone(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::config::AuthConfig;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn resolver() -> (SessionResolver, Arc<TokenCodec>) {
        let codec = Arc::new(TokenCodec::new(&AuthConfig {
            session_secret: "resolver-secret".to_string(),
            ..AuthConfig::default()
        }));
        let policy = Arc::new(RoutePolicy::from_config(&AccessConfig::default()).unwrap());
        let resolver = SessionResolver::new(Arc::clone(&codec), policy, &AccessConfig::default());
        (resolver, codec)
    }

    fn token(codec: &TokenCodec, role: Role) -> String {
        let claims = codec.issue_at("u-42", "kim@example.com", Some("Kim"), role, at(1_000));
        codec.sign(&claims).unwrap()
    }

    #[test]
    fn test_current_session_none_without_cookie() {
        let (resolver, _) = resolver();
        assert_eq!(resolver.current_session_at(None, at(1_001)), None);
    }

    #[test]
    fn test_current_session_none_for_invalid_token() {
        let (resolver, _) = resolver();
        assert_eq!(resolver.current_session_at(Some("nope"), at(1_001)), None);
    }

    #[test]
    fn test_current_session_projects_claims() {
        let (resolver, codec) = resolver();
        let session = resolver
            .current_session_at(Some(&token(&codec, Role::User)), at(1_001))
            .unwrap();
        assert_eq!(
            session,
            ResolvedSession {
                id: "u-42".to_string(),
                email: "kim@example.com".to_string(),
                name: Some("Kim".to_string()),
                role: Role::User,
            }
        );
    }

    #[test]
    fn test_check_access_on_public_route_without_user() {
        let (resolver, _) = resolver();
        let check = resolver.check_access_at(None, "/cart", at(1_001));
        assert!(check.allowed);
        assert_eq!(check.user, None);
        assert_eq!(check.role, None);
    }

    #[test]
    fn test_require_access_grants_admin() {
        let (resolver, codec) = resolver();
        let granted = resolver
            .require_access_at(Some(&token(&codec, Role::Admin)), "/admin/orders", at(1_001))
            .unwrap();
        assert_eq!(granted.role, Some(Role::Admin));
        assert_eq!(granted.user.unwrap().id, "u-42");
    }

    #[test]
    fn test_require_access_denies_user_on_admin_route() {
        let (resolver, codec) = resolver();
        let denied = resolver
            .require_access_at(Some(&token(&codec, Role::User)), "/admin/orders", at(1_001))
            .unwrap_err();
        assert_eq!(denied.redirect_to, "/");
        assert_eq!(
            denied.reason,
            AccessError::RoleMismatch {
                role: Role::User,
                required: Role::Admin,
            }
        );
    }

    #[test]
    fn test_require_access_reports_credential_failure() {
        let (resolver, codec) = resolver();
        let denied = resolver
            .require_access_at(None, "/account/orders", at(1_001))
            .unwrap_err();
        assert_eq!(denied.reason, AccessError::CredentialMissing);

        let expired = token(&codec, Role::Admin);
        let denied = resolver
            .require_access_at(Some(&expired), "/admin", at(1_000 + 25 * 60 * 60))
            .unwrap_err();
        assert_eq!(denied.reason, AccessError::CredentialExpired);
        assert_eq!(denied.redirect_to, "/");
    }

    #[test]
    fn test_landing_path_by_role() {
        let (resolver, _) = resolver();
        assert_eq!(resolver.landing_path(None), "/auth");
        assert_eq!(resolver.landing_path(Some(Role::Guest)), "/auth");
        assert_eq!(resolver.landing_path(Some(Role::User)), "/");
        assert_eq!(resolver.landing_path(Some(Role::Admin)), "/");
    }

    #[test]
    fn test_dot_segment_paths_are_denied_to_non_admins() {
        let (resolver, codec) = resolver();
        let denied = resolver
            .require_access_at(None, "/admin/../cart", at(1_001))
            .unwrap_err();
        assert_eq!(denied.reason, AccessError::CredentialMissing);

        let denied = resolver
            .require_access_at(Some(&token(&codec, Role::User)), "/cart/./x", at(1_001))
            .unwrap_err();
        assert_eq!(
            denied.reason,
            AccessError::RoleMismatch {
                role: Role::User,
                required: Role::Admin,
            }
        );

        assert!(
            resolver
                .require_access_at(Some(&token(&codec, Role::Admin)), "/admin/../cart", at(1_001))
                .is_ok()
        );
    }
}
