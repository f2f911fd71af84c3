//! Edge gate decisions for protected path prefixes.
//!
//! The decision only looks at the path and the cookie value: no database,
//! no network. Anything ambiguous denies.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, warn};

use storefront_core::config::AccessConfig;

use crate::error::AccessError;
use crate::policy::RoutePolicy;
use crate::token::TokenCodec;

/// Characters kept verbatim in the `redirect` query parameter.
const RETURN_TO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Result of gating one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Let the request through untouched.
    Forwarded,
    /// Missing or unusable credential: send the visitor to sign-in.
    RedirectToAuth {
        /// Sign-in URL carrying the original path.
        location: String,
        /// Which credential check failed.
        reason: AccessError,
    },
    /// Valid credential, insufficient role: send the visitor home.
    RedirectToHome {
        /// Home URL.
        location: String,
        /// Always a [`AccessError::RoleMismatch`].
        reason: AccessError,
    },
}

impl GateOutcome {
    /// Redirect target, if the request does not go through.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Forwarded => None,
            Self::RedirectToAuth { location, .. } | Self::RedirectToHome { location, .. } => {
                Some(location)
            }
        }
    }
}

/// Decides, per request, whether a protected path may be reached.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    codec: Arc<TokenCodec>,
    policy: Arc<RoutePolicy>,
    sign_in_path: String,
    home_path: String,
}

impl Gatekeeper {
    /// Creates a gatekeeper over the shared codec and policy.
    pub fn new(codec: Arc<TokenCodec>, policy: Arc<RoutePolicy>, config: &AccessConfig) -> Self {
        Self {
            codec,
            policy,
            sign_in_path: config.sign_in_path.clone(),
            home_path: config.home_path.clone(),
        }
    }

    /// Gates `path` given the raw session cookie value, if any.
    pub fn evaluate(&self, path: &str, credential: Option<&str>) -> GateOutcome {
        self.evaluate_at(path, credential, Utc::now())
    }

    /// Gates `path` as of `now`.
    pub fn evaluate_at(
        &self,
        path: &str,
        credential: Option<&str>,
        now: DateTime<Utc>,
    ) -> GateOutcome {
        if !self.policy.is_protected(path) {
            return GateOutcome::Forwarded;
        }

        let Some(token) = credential.filter(|t| !t.is_empty()) else {
            return self.to_sign_in(path, AccessError::CredentialMissing);
        };

        let claims = match self.codec.verify_at(token, now) {
            Ok(claims) => claims,
            Err(e) => return self.to_sign_in(path, e.into()),
        };

        let required = self.policy.required_role(path);
        if !self.policy.can_access(Some(claims.role), path) {
            warn!(
                path = %path,
                email = %claims.email,
                role = %claims.role,
                required = %required,
                "Unauthorized access attempt to protected path"
            );
            return GateOutcome::RedirectToHome {
                location: self.home_path.clone(),
                reason: AccessError::RoleMismatch {
                    role: claims.role,
                    required,
                },
            };
        }

        GateOutcome::Forwarded
    }

    /// Sign-in URL that returns the visitor to `path` afterwards.
    pub fn sign_in_location(&self, path: &str) -> String {
        format!(
            "{}?redirect={}",
            self.sign_in_path,
            utf8_percent_encode(path, RETURN_TO)
        )
    }

    fn to_sign_in(&self, path: &str, reason: AccessError) -> GateOutcome {
        debug!(path = %path, reason = reason.code(), "Protected path requires sign-in");
        GateOutcome::RedirectToAuth {
            location: self.sign_in_location(path),
            reason,
        }
    }
}
