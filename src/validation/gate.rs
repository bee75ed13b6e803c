//! The validation gate: every rule of a route, run against one request.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::{Map, Value};

use super::result::{FieldError, ValidationResult};
use super::rules::{FieldRule, Location};

/// The parts of a request that rules can look at.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    /// Parsed JSON body. Anything that is not an object is replaced by `{}`.
    pub body: Map<String, Value>,

    /// Captured path parameters by name.
    pub params: HashMap<String, String>,
}

impl RequestInput {
    pub fn new(body: Value, params: HashMap<String, String>) -> Self {
        let body = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { body, params }
    }

    /// Build the input from raw body bytes. Empty or malformed bodies read
    /// as an empty object so that their fields simply count as missing.
    pub fn from_bytes(bytes: &[u8], params: HashMap<String, String>) -> Self {
        let body = serde_json::from_slice(bytes).unwrap_or(Value::Null);
        Self::new(body, params)
    }

    fn lookup(&self, location: Location, field: &str) -> Option<Value> {
        match location {
            Location::Body => self.body.get(field).cloned(),
            Location::Params => self.params.get(field).cloned().map(Value::String),
        }
    }
}

/// An immutable, ordered list of rules bound to one route.
#[derive(Debug, Clone)]
pub struct ValidationGate {
    rules: Arc<[FieldRule]>,
}

impl ValidationGate {
    pub fn new(rules: impl Into<Arc<[FieldRule]>>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    /// Run every rule against `input` and collect all failures.
    ///
    /// All checks are started together and joined before the result is
    /// built; a failing rule never prevents the others from running.
    pub async fn evaluate(&self, input: &RequestInput) -> ValidationResult {
        let checks = self.rules.iter().map(|rule| async move {
            let value = input.lookup(rule.location, rule.field);
            if rule.constraint.check(value.as_ref()) {
                None
            } else {
                Some(FieldError::from_rule(rule, value))
            }
        });

        join_all(checks).await.into_iter().flatten().collect()
    }
}
