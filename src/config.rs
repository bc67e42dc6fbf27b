//! Issuance configuration
//!
//! Values are captured once at startup and passed by reference into the
//! credential builder. Nothing is required at construction time; a missing
//! value only fails the issuance call that needs it.

use crate::auth::ApiSecret;
use std::time::Duration;

pub const API_KEY_VAR: &str = "LIVEKIT_API_KEY";
pub const API_SECRET_VAR: &str = "LIVEKIT_API_SECRET";
/// Preferred server address variable
pub const WS_URL_VAR: &str = "LIVEKIT_WS_URL";
/// Legacy server address variable, used when [`WS_URL_VAR`] is absent
pub const URL_VAR: &str = "LIVEKIT_URL";

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Credentials and server address for the real-time service
#[derive(Debug, Clone, Default)]
pub struct LiveKitConfig {
    /// Signing key id, embedded as the token issuer
    pub api_key: Option<String>,
    /// Signing secret
    pub api_secret: Option<ApiSecret>,
    /// Preferred server address
    pub ws_url: Option<String>,
    /// Legacy server address
    pub url: Option<String>,
}

impl LiveKitConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            api_key: get(API_KEY_VAR),
            api_secret: get(API_SECRET_VAR).map(ApiSecret::new),
            ws_url: get(WS_URL_VAR),
            url: get(URL_VAR),
        }
    }

    /// The server address clients should connect to, preferring the
    /// websocket URL over the legacy one.
    ///
    /// An empty `LIVEKIT_WS_URL` is already dropped by [`Self::from_lookup`],
    /// so it falls back to `LIVEKIT_URL` instead of being rejected.
    pub fn server_url(&self) -> Option<&str> {
        self.ws_url.as_deref().or(self.url.as_deref())
    }
}

/// Per-issuance knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuanceOptions {
    /// How long issued tokens stay valid
    pub ttl: Duration,
}

impl IssuanceOptions {
    pub fn new() -> Self {
        Self {
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Set the token lifetime
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for IssuanceOptions {
    fn default() -> Self {
        Self::new()
    }
}
