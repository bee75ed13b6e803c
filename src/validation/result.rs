//! Per-request validation outcome.

use serde::Serialize;
use serde_json::Value;

use super::rules::{FieldRule, Location};

/// One failed rule, as reported to the client.
///
/// # JSON Example
///
/// ```json
/// {
///   "type": "field",
///   "value": "not-an-email",
///   "message": "Invalid email",
///   "field": "email",
///   "location": "body"
/// }
/// ```
///
/// `value` is left out when the field was not present at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    pub message: String,
    pub field: String,
    pub location: Location,
}

impl FieldError {
    pub fn from_rule(rule: &FieldRule, value: Option<Value>) -> Self {
        Self {
            kind: "field",
            value,
            message: rule.message.to_string(),
            field: rule.field.to_string(),
            location: rule.location,
        }
    }
}

/// Failures collected by one gate evaluation, in rule declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl FromIterator<FieldError> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}
