use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Request-scoped error taxonomy. Every variant terminates the current
/// request only; nothing here escalates to process exit.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing request body.
    #[error("{0}")]
    Parse(&'static str),
    /// Bad credentials or bad bearer token. Callers get the same body for
    /// unknown-username and wrong-password so usernames cannot be enumerated.
    #[error("{0}")]
    Auth(&'static str),
    /// The password hashing primitive failed. Detail is logged at the call
    /// site, never echoed to the client.
    #[error("Error hashing password")]
    Hashing,
    #[error("Database error")]
    Store(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Parse(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Hashing | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(e) = &self {
            error!(error = %e, "store operation failed");
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
