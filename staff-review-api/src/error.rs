use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::OnceLock;
use thiserror::Error;
use validator::ValidationErrors;

use staff_review_core::CoreError;

/// Controls how much internal detail error responses expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Echo full internal detail to the caller.
    Development,
    /// Log detail server-side, return a generic message.
    Production,
}

static ERROR_MODE: OnceLock<ErrorMode> = OnceLock::new();

/// Selects the error mode once at startup. Later calls are ignored.
pub fn set_error_mode(mode: ErrorMode) {
    let _ = ERROR_MODE.set(mode);
}

fn error_mode() -> ErrorMode {
    *ERROR_MODE.get().unwrap_or(&ErrorMode::Production)
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Anticipated internal failure with a safe, user-facing message,
    /// e.g. a wrapped store error.
    #[error("{0}")]
    Internal(String),

    /// Unanticipated failure. The detail is only ever echoed in
    /// development mode.
    #[error("Something went wrong!")]
    Unexpected(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ApiError::Validation(msg),
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            CoreError::Database(msg) | CoreError::Internal(msg) => ApiError::Unexpected(msg),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(format!("Invalid input data. {}", errors))
    }
}

/// Single translation point from error kind to HTTP status and envelope.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Unexpected(detail) => {
                tracing::error!(%detail, "unexpected error");
                match error_mode() {
                    ErrorMode::Development => json!({
                        "success": false,
                        "message": "Something went wrong!",
                        "error": { "statusCode": status.as_u16(), "details": detail },
                    }),
                    ErrorMode::Production => json!({
                        "success": false,
                        "message": "Something went wrong!",
                    }),
                }
            }
            operational => json!({
                "success": false,
                "message": operational.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
