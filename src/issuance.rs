//! Connection details issuance
//!
//! Turns a room/identity pair into a signed access token plus the server
//! address the client should dial. Inputs and configuration are checked
//! before anything is signed.

use crate::auth::{grants, sign_token};
use crate::config::{
    IssuanceOptions, LiveKitConfig, API_KEY_VAR, API_SECRET_VAR, URL_VAR, WS_URL_VAR,
};
use crate::error::IssueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Message returned when the room or identity is missing
pub const MISSING_FIELDS_MESSAGE: &str = "room and identity are required";

/// What a client needs to join a room
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    /// Address of the real-time server
    pub server_url: String,
    /// Signed access token
    pub token: String,
}

impl fmt::Debug for ConnectionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDetails")
            .field("server_url", &self.server_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Issue connection details for `identity` in `room`.
///
/// Both values are trimmed; either being empty afterwards is a validation
/// error. The API key, secret and server URL are resolved in that order and
/// the first missing one is reported.
pub fn build_connection_details(
    config: &LiveKitConfig,
    room: &str,
    identity: &str,
    options: &IssuanceOptions,
) -> Result<ConnectionDetails, IssueError> {
    let room = room.trim();
    let identity = identity.trim();

    if room.is_empty() || identity.is_empty() {
        return Err(IssueError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| IssueError::missing_env(API_KEY_VAR))?;
    let api_secret = config
        .api_secret
        .as_ref()
        .ok_or_else(|| IssueError::missing_env(API_SECRET_VAR))?;
    let server_url = config.server_url().ok_or_else(|| {
        IssueError::Configuration(format!("Missing {} (preferred) or {}", WS_URL_VAR, URL_VAR))
    })?;

    let token = sign_token(
        api_key,
        api_secret,
        identity,
        grants::full_access(room),
        options.ttl,
    )?;

    debug!(
        room = room,
        identity = identity,
        ttl_secs = options.ttl.as_secs(),
        "Issued access token"
    );

    Ok(ConnectionDetails {
        server_url: server_url.to_string(),
        token,
    })
}
