//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the HTTP boundary. Each
//! variant maps to a specific HTTP status code and structured JSON error
//! response. Listener failures inside fan-out use the separate
//! [`ListenerError`](crate::domain::ListenerError) and never surface here.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid channel: fax (expected email, sms or push)"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Request errors raised at the HTTP boundary.
///
/// Every variant is a validation failure (code range 1000–1999, HTTP 400)
/// and leaves server state untouched. Nothing past validation can fail:
/// unknown ids are not errors and listener failures stay inside fan-out.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed (missing or empty field, malformed body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Channel is not one of the recognized values.
    #[error("invalid channel: {0} (expected email, sms or push)")]
    InvalidChannel(String),

    /// Event type is not one of the recognized values.
    #[error("invalid event type: {0} (expected CREATED, UPDATED or CANCELLED)")]
    InvalidEventType(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidChannel(_) => 1002,
            Self::InvalidEventType(_) => 1003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidChannel(_) | Self::InvalidEventType(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        for err in [
            GatewayError::InvalidRequest("name is required".to_string()),
            GatewayError::InvalidChannel("fax".to_string()),
            GatewayError::InvalidEventType("DELETED".to_string()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert!(err.error_code() < 2000);
        }
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            GatewayError::InvalidRequest(String::new()).error_code(),
            GatewayError::InvalidChannel(String::new()).error_code(),
            GatewayError::InvalidEventType(String::new()).error_code(),
        ];
        assert_eq!(codes, [1001, 1002, 1003]);
    }

    #[test]
    fn into_response_sets_status() {
        let response = GatewayError::InvalidChannel("fax".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn message_names_offending_value() {
        let err = GatewayError::InvalidChannel("fax".to_string());
        assert!(err.to_string().contains("fax"));
    }
}
