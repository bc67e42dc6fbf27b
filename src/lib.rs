//! Roomgate - connection details for real-time rooms
//!
//! Issues short-lived, room-scoped access tokens and the server address a
//! client needs to join a LiveKit room, over a small HTTP endpoint.

pub mod auth;
pub mod config;
pub mod error;
pub mod issuance;
pub mod messages;
pub mod server;

pub use auth::{sign_token, verify_token, AccessTokenError, ApiSecret, Claims, VideoGrants};
pub use config::{IssuanceOptions, LiveKitConfig};
pub use error::{ErrorKind, IssueError};
pub use issuance::{build_connection_details, ConnectionDetails};
pub use messages::DataMessage;
pub use server::AppState;
