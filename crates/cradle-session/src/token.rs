//! Signed session-token codec.
//!
//! A session token is an HS256 JWT binding a single claim — the
//! authenticated user's identity — with an expiry. Verification collapses
//! every failure (bad signature, malformed payload, missing claims,
//! expiry) into one `Invalid` signal so callers cannot distinguish
//! sub-causes.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Session lifetime in seconds (30 days).
pub const SESSION_TTL_SECS: u64 = 2_592_000;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity (email-like user id).
    pub sub: String,
    /// Issued-at timestamp (seconds since UNIX epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Errors returned by the session codec.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Malformed, mis-signed, or expired token. Deliberately
    /// undifferentiated: all three are fatal to the request's
    /// authentication and treated identically.
    #[error("invalid session token")]
    Invalid,
    /// Token could not be signed. Only reachable with a broken key setup.
    #[error("failed to sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue a session token for `identity`, valid for `ttl_secs` from now.
pub fn issue_session(identity: &str, secret: &str, ttl_secs: u64) -> Result<String, SessionError> {
    let iat = now_secs();
    let claims = SessionClaims {
        sub: identity.to_owned(),
        iat,
        exp: iat + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(SessionError::Signing)
}

/// Verify a session token and return the identity it was issued for.
///
/// Zero clock leeway: a token is `Invalid` at or after `iat + ttl`.
/// The underlying library compares signatures in constant time.
pub fn verify_session(token: &str, secret: &str) -> Result<String, SessionError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| SessionError::Invalid)?;

    Ok(data.claims.sub)
}
