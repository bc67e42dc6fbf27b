//! Access token issuance and verification
//!
//! Tokens are stateless and self-contained: a signed JWT naming the
//! participant identity and a grant scoped to one room. Nothing is stored,
//! so an issued token cannot be looked up or revoked before expiry.

pub mod grants;
mod tokens;

pub use livekit_api::access_token::{AccessTokenError, Claims, VideoGrants};
pub use tokens::{sign_token, verify_token, ApiSecret};
