use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced to API clients as `{ "message": ... }` bodies.
#[derive(Debug)]
pub enum AppError {
    /// Request failed validation (400).
    Validation(&'static str),
    /// Credentials or 2FA code rejected; message stays generic (401).
    Auth(&'static str),
    /// Entity does not exist (404).
    NotFound(&'static str),
    /// Missing or invalid bearer token (401).
    Unauthorized,
    /// Unexpected failure; details already logged (500).
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Auth(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (code, Json(json!({ "message": message }))).into_response()
    }
}

pub trait ResultExt<T> {
    /// Log the underlying error and replace it with an opaque 500.
    fn reject(self, context: &'static str) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for color_eyre::Result<T> {
    fn reject(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{context}: {e}");
            AppError::Internal(context)
        })
    }
}
