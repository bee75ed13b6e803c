//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::validation::FieldError;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error body.
///
/// # Error Categories
///
/// - **Validation Errors**: field rules rejected the request
/// - **Request Errors**: the request body could not be buffered
/// - **Upstream Errors**: the business service could not be reached
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more field rules failed.
    ///
    /// Returns HTTP 400 with every failure listed.
    #[error("Validation failed ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),

    /// Request body exceeded the buffering limit.
    ///
    /// Returns HTTP 413 Payload Too Large.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// The upstream business service failed at the transport level.
    ///
    /// Returns HTTP 502 Bad Gateway (hides details from client).
    #[error("Upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// An upstream URL could not be built from the configured base.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Invalid upstream URL: {0}")]
    InvalidUpstreamUrl(#[from] url::ParseError),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// Validation failures use the field-error list:
/// ```json
/// {
///   "errors": [
///     { "type": "field", "message": "Invalid email", "field": "email", "location": "body" }
///   ]
/// }
/// ```
///
/// All other errors use:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Validation` → 400 Bad Request
/// - `PayloadTooLarge` → 413 Payload Too Large
/// - `Upstream` → 502 Bad Gateway
/// - `InvalidUpstreamUrl` → 500 Internal Server Error
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(errors) => {
                return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors })))
                    .into_response();
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                self.to_string(),
            ),
            AppError::Upstream(ref e) => {
                tracing::error!("Upstream request failed: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_unavailable",
                    "The user service is unavailable".to_string(),
                )
            }
            AppError::InvalidUpstreamUrl(ref e) => {
                tracing::error!("Could not build upstream URL: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FieldRule, rules::Location};
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_lists_every_field_error() {
        let rule = FieldRule::body("email").is_email().with_message("Invalid email");
        let errors = vec![
            FieldError::from_rule(&rule, Some(Value::String("x".into()))),
            FieldError::from_rule(&rule, None),
        ];

        let response = AppError::Validation(errors).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["type"], "field");
        assert_eq!(errors[0]["field"], "email");
        assert_eq!(errors[0]["message"], "Invalid email");
        assert_eq!(errors[0]["location"], "body");
        assert_eq!(errors[0]["value"], "x");
        assert!(errors[1].get("value").is_none());
    }

    #[tokio::test]
    async fn payload_too_large_uses_error_envelope() {
        let response = AppError::PayloadTooLarge.into_response();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "payload_too_large");
    }

    #[test]
    fn bad_upstream_url_returns_500() {
        let err = url::Url::parse("not a url").unwrap_err();

        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn params_location_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Location::Params).unwrap(),
            Value::String("params".to_string())
        );
    }
}
