//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use common::schema::{self, FieldError, RequestSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// How the request declared its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    /// No `Content-Type` header; the body is parsed as JSON.
    Unspecified,
    Other,
}

/// JSON body extractor that validates against `T`'s field schema before
/// deserializing.
///
/// Unlike [`axum::Json`], every failure to produce a `T` from the body
/// (syntax, shape, field types, empty body, non-JSON content type) is
/// reported as [`ApiError::Validation`]. A body sent without any
/// `Content-Type` is treated as JSON.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + RequestSchema,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = body_format(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(ApiError::Body)?;

        if bytes.is_empty() {
            return Err(ApiError::Validation(vec![FieldError::missing_body()]));
        }

        let value = match format {
            BodyFormat::Json | BodyFormat::Unspecified => parse_json(&bytes)?,
            // A declared non-JSON body is opaque text, which can never
            // satisfy an object schema.
            BodyFormat::Other => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };

        schema::validate::<T>(&value).map_err(ApiError::Validation)?;

        serde_json::from_value(value).map(ValidatedJson).map_err(|e| {
            ApiError::Internal(format!("validated body failed to deserialize: {e}"))
        })
    }
}

fn parse_json(bytes: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| {
        let offset = byte_offset(bytes, e.line(), e.column());
        ApiError::Validation(vec![FieldError::json_invalid(offset, e.to_string())])
    })
}

/// Converts serde_json's 1-based line/column into a 0-based byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = bytes
        .split_inclusive(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(<[u8]>::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(bytes.len())
}

fn body_format(headers: &HeaderMap) -> BodyFormat {
    let Some(content_type) = headers.get(header::CONTENT_TYPE) else {
        return BodyFormat::Unspecified;
    };
    let Ok(content_type) = content_type.to_str() else {
        return BodyFormat::Other;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
    {
        BodyFormat::Json
    } else {
        BodyFormat::Other
    }
}
