//! Validation gate middleware.
//!
//! This middleware runs in front of each user route to:
//! 1. Buffer the request body and collect the captured path parameters
//! 2. Evaluate every field rule bound to the route
//! 3. Reject the request with HTTP 400 and the full error list, or
//! 4. Hand the untouched request to the route handler

use std::collections::HashMap;

use axum::{
    body::{Body, to_bytes},
    extract::{FromRequestParts, RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};

use crate::{
    error::AppError,
    validation::{RequestInput, ValidationGate},
};

/// Largest body the gate will buffer (matches axum's default body limit).
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// JSON body of a request that passed the gate.
///
/// Inserted into the request extensions so handlers do not parse the body
/// a second time. Fields are exactly as the client sent them.
#[derive(Debug, Clone)]
pub struct ValidatedBody(pub Map<String, Value>);

/// Validation gate middleware function.
///
/// # Flow
///
/// 1. Split the request and read raw path parameters (none is fine; a
///    parameter that does not decode to UTF-8 counts as absent)
/// 2. Buffer the body; empty or non-JSON bodies count as `{}`
/// 3. Run all rules of `gate` and wait for every one of them
/// 4. If any failed: return 400 with `{ "errors": [...] }`
/// 5. Otherwise: rebuild the request with the same bytes, attach
///    [`ValidatedBody`], and call the next handler once
///
/// # Arguments
///
/// * `State(gate)` - Rules bound to the matched route
/// * `request` - Incoming HTTP request
/// * `next` - Route handler
pub async fn validate(
    State(gate): State<ValidationGate>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();

    let params: HashMap<String, String> = RawPathParams::from_request_parts(&mut parts, &())
        .await
        .map(|raw| {
            raw.iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        })
        .unwrap_or_else(|rejection| {
            tracing::debug!(
                "Unreadable path parameters on {}, treating them as absent: {}",
                parts.uri.path(),
                rejection
            );
            HashMap::new()
        });

    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        tracing::debug!("Could not buffer request body: {}", e);
        AppError::PayloadTooLarge
    })?;

    let input = RequestInput::from_bytes(&bytes, params);
    let result = gate.evaluate(&input).await;

    if !result.is_empty() {
        let fields: Vec<&str> = result.errors().iter().map(|e| e.field.as_str()).collect();
        tracing::debug!(
            "Rejected {} {}: {} rule(s) failed on {:?}",
            parts.method,
            parts.uri.path(),
            result.len(),
            fields
        );
        return Err(AppError::Validation(result.into_errors()));
    }

    parts.extensions.insert(ValidatedBody(input.body));
    let request = Request::from_parts(parts, Body::from(bytes));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldRule;
    use axum::{
        Extension, Router,
        http::{Method, StatusCode},
        middleware::from_fn_with_state,
        routing::post,
    };
    use serde_json::json;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tower::ServiceExt;

    fn echo_router(calls: Arc<AtomicUsize>) -> Router {
        let gate = ValidationGate::new(vec![
            FieldRule::param("id").not_empty().with_message("id required"),
            FieldRule::body("name").not_empty().with_message("name required"),
        ]);

        Router::new().route(
            "/items/{id}",
            post(move |Extension(ValidatedBody(body)): Extension<ValidatedBody>, raw: String| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    axum::Json(json!({ "parsed": body, "raw": raw }))
                }
            })
            .layer(from_fn_with_state(gate, validate)),
        )
    }

    fn post_request(uri: &str, body: &'static str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn passing_request_reaches_handler_with_body_intact() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = echo_router(calls.clone());

        let response = app
            .oneshot(post_request("/items/7", r#"{"name":"lamp"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["parsed"]["name"], "lamp");
        assert_eq!(body["raw"], r#"{"name":"lamp"}"#);
    }

    #[tokio::test]
    async fn failing_request_never_reaches_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = echo_router(calls.clone());

        let response = app
            .oneshot(post_request("/items/7", r#"{"name":""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_body_counts_as_missing_fields() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = echo_router(calls.clone());

        let response = app.oneshot(post_request("/items/7", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"][0]["field"], "name");
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    }
}
