//! Session token signing and verification (HS256).

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode};
use thiserror::Error;

use storefront_core::config::{AuthConfig, MAX_SESSION_TTL_MINUTES};
use storefront_core::error::AppError;
use storefront_entity::user::Role;

use super::claims::Claims;

/// Why an untrusted token was rejected.
///
/// Every variant is an ordinary return value; nothing about a bad token is
/// fatal to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The token is not shaped like a signed credential: it lacks three
    /// non-empty base64url segments, or a correctly signed payload does not
    /// hold the expected claims.
    #[error("session token is malformed")]
    Malformed,
    /// The signature does not match the server secret. Any change to a
    /// well-shaped token, header included, lands here.
    #[error("session token signature is invalid")]
    SignatureInvalid,
    /// The credential is past its expiry.
    #[error("session token has expired")]
    Expired,
}

/// Signs and verifies session credentials with the process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature validation settings; expiry is checked separately.
    validation: Validation,
    /// Lifetime of freshly issued tokens.
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_minutes", &self.ttl.num_minutes())
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    ///
    /// The TTL is capped at [`MAX_SESSION_TTL_MINUTES`]; configuration
    /// validation rejects larger values before this point.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.session_secret.as_bytes()),
            validation,
            ttl: session_ttl(config.session_ttl_minutes),
        }
    }

    /// Builds claims for a freshly signed-in user, valid from now for the configured TTL.
    pub fn issue(&self, user_id: &str, email: &str, name: Option<&str>, role: Role) -> Claims {
        self.issue_at(user_id, email, name, role, Utc::now())
    }

    /// Builds claims as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: &str,
        email: &str,
        name: Option<&str>,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Claims {
        Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.map(str::to_string),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        }
    }

    /// Signs the claims into a compact token string.
    ///
    /// Deterministic: equal claims under the same secret yield the same token.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))
    }

    /// Verifies a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, VerificationError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as of `now`.
    ///
    /// Checks structure, then signature, then expiry. A token that fails
    /// more than one check reports the first failure.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, VerificationError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || !segments.iter().all(|s| is_base64url(s)) {
            return Err(VerificationError::Malformed);
        }

        // The header is covered by the signature, so an unreadable header on
        // a well-shaped token is a forgery rather than a shape fault.
        let header = decode_header(token).map_err(|_| VerificationError::SignatureInvalid)?;
        if header.alg != Algorithm::HS256 {
            return Err(VerificationError::SignatureInvalid);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))?;

        if claims.is_expired_at(now) {
            return Err(VerificationError::Expired);
        }

        Ok(claims)
    }
}

fn session_ttl(minutes: u64) -> chrono::Duration {
    let minutes = minutes.min(MAX_SESSION_TTL_MINUTES) as i64;
    chrono::Duration::try_minutes(minutes).unwrap_or(chrono::Duration::MAX)
}

fn is_base64url(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Maps a decoder failure onto the verification taxonomy.
///
/// The signature is checked before the payload is decoded, so base64 damage
/// reaching this point sits in the signature segment.
fn classify(kind: &JwtErrorKind) -> VerificationError {
    match kind {
        JwtErrorKind::ExpiredSignature => VerificationError::Expired,
        JwtErrorKind::InvalidToken
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_)
        | JwtErrorKind::MissingRequiredClaim(_) => VerificationError::Malformed,
        _ => VerificationError::SignatureInvalid,
    }
}
