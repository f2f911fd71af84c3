//! Access failure taxonomy.
//!
//! None of these ever reach an end user as an error page. Each one resolves
//! to a navigation outcome: the credential kinds send the visitor to
//! sign-in, [`AccessError::RoleMismatch`] sends a signed-in visitor home.

use thiserror::Error;

use storefront_entity::user::Role;

use crate::token::VerificationError;

/// Why an access check did not let a request through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No session credential accompanied the request.
    #[error("no session credential")]
    CredentialMissing,
    /// The credential could not be parsed.
    #[error("session credential is malformed")]
    CredentialMalformed,
    /// The credential is past its expiry.
    #[error("session credential has expired")]
    CredentialExpired,
    /// The credential's signature does not verify.
    #[error("session credential signature is invalid")]
    SignatureInvalid,
    /// The credential is valid but its role is insufficient for the path.
    #[error("role '{role}' does not satisfy required role '{required}'")]
    RoleMismatch {
        /// Role carried by the credential.
        role: Role,
        /// Role the path requires.
        required: Role,
    },
    /// The session introspection call failed.
    #[error("session introspection failed: {0}")]
    NetworkFailure(String),
}

impl AccessError {
    /// Whether the visitor should be sent to sign-in rather than home.
    pub fn requires_sign_in(&self) -> bool {
        matches!(
            self,
            Self::CredentialMissing
                | Self::CredentialMalformed
                | Self::CredentialExpired
                | Self::SignatureInvalid
        )
    }

    /// Short machine-readable label, used in structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CredentialMissing => "credential_missing",
            Self::CredentialMalformed => "credential_malformed",
            Self::CredentialExpired => "credential_expired",
            Self::SignatureInvalid => "signature_invalid",
            Self::RoleMismatch { .. } => "role_mismatch",
            Self::NetworkFailure(_) => "network_failure",
        }
    }
}

impl From<VerificationError> for AccessError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::Malformed => Self::CredentialMalformed,
            VerificationError::SignatureInvalid => Self::SignatureInvalid,
            VerificationError::Expired => Self::CredentialExpired,
        }
    }
}
