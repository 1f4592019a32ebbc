use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Failure returned by every board operation. Nothing here aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("{0}")]
    ValidationFailed(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotAuthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl BoardError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub(crate) fn not_authorized() -> Self {
        Self::NotAuthorized("Not authorized".to_string())
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BoardError::NotFound(_) => StatusCode::NOT_FOUND,
            BoardError::NotAuthorized(_) => StatusCode::FORBIDDEN,
            BoardError::Conflict(_) => StatusCode::CONFLICT,
            BoardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed or incomplete request bodies are validation failures like any other bad input.
impl From<JsonRejection> for BoardError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationFailed(rejection.body_text())
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let BoardError::Storage(err) = &self {
            error!(error = %err, "storage failure while serving request");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
