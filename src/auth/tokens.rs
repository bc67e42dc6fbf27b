//! Access token signing and verification
//!
//! Tokens are LiveKit access tokens: HS256 JWTs with the API key as issuer,
//! the participant identity as subject and the room grant under `video`.

use livekit_api::access_token::{AccessToken, AccessTokenError, Claims, TokenVerifier, VideoGrants};
use std::fmt;
use std::time::Duration;

/// API secret used to sign tokens
#[derive(Clone)]
pub struct ApiSecret {
    secret: String,
}

impl ApiSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiSecret([REDACTED])")
    }
}

/// Sign a token for `identity` carrying `grant`, valid for `ttl` from now
pub fn sign_token(
    api_key: &str,
    secret: &ApiSecret,
    identity: &str,
    grant: VideoGrants,
    ttl: Duration,
) -> Result<String, AccessTokenError> {
    AccessToken::with_api_key(api_key, secret.as_str())
        .with_identity(identity)
        .with_grants(grant)
        .with_ttl(ttl)
        .to_jwt()
}

/// Verify a token's signature, issuer and validity window and return its claims
pub fn verify_token(
    api_key: &str,
    secret: &ApiSecret,
    token: &str,
) -> Result<Claims, AccessTokenError> {
    TokenVerifier::with_api_key(api_key, secret.as_str()).verify(token)
}
