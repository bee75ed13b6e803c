//! Response produced by a business collaborator.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Status and JSON body chosen by the business logic, relayed unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ControllerResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for ControllerResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
