use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use formgate_core::error::{ValidationError, ValidationFailure};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ValidationError`] for engine errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A validation failure or malformed rule specification.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The anti-forgery token was missing or did not verify.
    #[error("CSRF token mismatch")]
    CsrfMismatch,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::Validation(ValidationError::Failed(failure))
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Non-standard "page expired" status returned for anti-forgery rejections.
pub const CSRF_MISMATCH_STATUS: u16 = 419;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Validation engine ---
            AppError::Validation(ValidationError::Failed(failure)) => {
                let body = json!({
                    "error": failure.summary(),
                    "code": "VALIDATION_ERROR",
                    "errors": failure.errors(),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }
            AppError::Validation(ValidationError::Configuration(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_RULES", msg.clone())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::CsrfMismatch => (
                StatusCode::from_u16(CSRF_MISMATCH_STATUS).unwrap_or(StatusCode::FORBIDDEN),
                "CSRF_TOKEN_MISMATCH",
                "CSRF token mismatch.".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
