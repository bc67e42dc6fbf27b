//! HTTP endpoint for connection details

use crate::config::{IssuanceOptions, LiveKitConfig};
use crate::error::{ErrorKind, IssueError};
use crate::issuance::{build_connection_details, ConnectionDetails, MISSING_FIELDS_MESSAGE};

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Message returned when the body is not JSON
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LiveKitConfig>,
    pub options: IssuanceOptions,
}

impl AppState {
    pub fn new(config: LiveKitConfig, options: IssuanceOptions) -> Self {
        Self {
            config: Arc::new(config),
            options,
        }
    }
}

/// A failed request: the kind picks the status, `message` is all the
/// caller sees, `detail` goes to the server log only
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    detail: String,
}

impl ApiError {
    fn invalid_json(err: serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: INVALID_JSON_MESSAGE.to_string(),
            detail: err.to_string(),
        }
    }

    fn missing_fields() -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: MISSING_FIELDS_MESSAGE.to_string(),
            detail: MISSING_FIELDS_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status_code()
    }
}

impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            detail: format!("{:?}", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message }))).into_response()
    }
}

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/connection-details", post(connection_details_handler))
        .route("/api/connection-details", post(connection_details_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn connection_details_handler(State(state): State<AppState>, body: Bytes) -> Response {
    match issue(&state, &body) {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => {
            error!(
                kind = ?e.kind,
                status = e.status().as_u16(),
                error = %e.detail,
                "connection-details error"
            );
            e.into_response()
        }
    }
}

/// Handle one issuance request body.
///
/// An empty body, `null`, `{}` and any non-object JSON all count as missing
/// fields rather than malformed input.
pub fn issue(state: &AppState, body: &[u8]) -> Result<ConnectionDetails, ApiError> {
    let payload: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body).map_err(ApiError::invalid_json)?
    };

    let (room, identity) = match (str_field(&payload, "room"), str_field(&payload, "identity")) {
        (Some(room), Some(identity)) => (room, identity),
        _ => return Err(ApiError::missing_fields()),
    };

    let details = build_connection_details(&state.config, room, identity, &state.options)?;

    info!(room = room.trim(), identity = identity.trim(), "Issued connection details");

    Ok(details)
}

fn str_field<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    payload
        .get(name)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
}

/// Run the HTTP server until `shutdown` resolves
pub async fn run_http_server<F>(
    bind_addr: SocketAddr,
    state: AppState,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
