//! API error types with HTTP response mapping.
//!
//! Every error body is a JSON object with a single `detail` key. For
//! validation failures `detail` is the list of field errors; otherwise it
//! is a human-readable message.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed schema validation.
    #[error("request validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Endpoint exists but has no implementation behind it yet.
    #[error("{0}")]
    NotImplemented(String),

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Body could not be read at all (too large, connection dropped).
    #[error("{0}")]
    Body(BytesRejection),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Validation(errors) => serde_json::json!(errors),
            ApiError::Body(rejection) => serde_json::Value::String(rejection.body_text()),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                serde_json::Value::String(msg)
            }
            other => serde_json::Value::String(other.to_string()),
        };

        let body = serde_json::json!({ "detail": detail });
        (status, axum::Json(body)).into_response()
    }
}
