//! Declarative field rules.
//!
//! A rule names one field (in the JSON body or among the captured path
//! parameters), the constraint it must satisfy, and the message reported
//! when it does not. Rules are plain data; [`Constraint::check`] is the only
//! place where they are interpreted.

use serde::Serialize;
use serde_json::Value;
use validator::ValidateEmail;

/// Message used when a rule is declared without [`FieldRule::with_message`].
pub const DEFAULT_MESSAGE: &str = "Invalid value";

/// Where in the request a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// A member of the top-level JSON object in the request body.
    Body,
    /// A named parameter captured from the matched path pattern.
    Params,
}

/// A single constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Present, not null, and not an empty string or empty array.
    NonEmpty,
    /// A string holding a syntactically valid email address.
    IsEmail,
    /// At least `n` characters once the value is read as text.
    MinLength(usize),
    /// A JSON array with at least `n` elements.
    IsArrayMinSize(usize),
}

impl Constraint {
    /// Returns `true` when `value` satisfies the constraint.
    ///
    /// An absent field is passed in as `None` and fails every constraint
    /// that requires a value. `IsEmail` and `MinLength` look at each element
    /// of an array value and pass only if the array is non-empty and every
    /// element passes.
    pub fn check(&self, value: Option<&Value>) -> bool {
        match *self {
            Constraint::NonEmpty => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(Value::Array(items)) => !items.is_empty(),
                Some(_) => true,
            },
            Constraint::IsEmail => each_element(value, |item| match item {
                Some(Value::String(s)) => s.validate_email(),
                _ => false,
            }),
            Constraint::MinLength(min) => {
                each_element(value, |item| as_text(item).chars().count() >= min)
            }
            Constraint::IsArrayMinSize(min) => match value {
                Some(Value::Array(items)) => items.len() >= min,
                _ => false,
            },
        }
    }
}

fn each_element(value: Option<&Value>, check: impl Fn(Option<&Value>) -> bool) -> bool {
    match value {
        Some(Value::Array(items)) => !items.is_empty() && items.iter().all(|item| check(Some(item))),
        _ => check(value),
    }
}

/// Text form of a scalar value; anything else reads as empty.
fn as_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// One declarative constraint on one request field, with its failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub location: Location,
    pub field: &'static str,
    pub constraint: Constraint,
    pub message: &'static str,
}

/// Builder returned by [`FieldRule::body`] and [`FieldRule::param`] until a
/// constraint is chosen.
#[derive(Debug, Clone, Copy)]
pub struct FieldSelector {
    location: Location,
    field: &'static str,
}

impl FieldRule {
    /// Select a field of the JSON request body.
    pub const fn body(field: &'static str) -> FieldSelector {
        FieldSelector {
            location: Location::Body,
            field,
        }
    }

    /// Select a captured path parameter.
    pub const fn param(field: &'static str) -> FieldSelector {
        FieldSelector {
            location: Location::Params,
            field,
        }
    }

    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = message;
        self
    }
}

impl FieldSelector {
    const fn rule(self, constraint: Constraint) -> FieldRule {
        FieldRule {
            location: self.location,
            field: self.field,
            constraint,
            message: DEFAULT_MESSAGE,
        }
    }

    pub const fn not_empty(self) -> FieldRule {
        self.rule(Constraint::NonEmpty)
    }

    pub const fn is_email(self) -> FieldRule {
        self.rule(Constraint::IsEmail)
    }

    pub const fn min_length(self, min: usize) -> FieldRule {
        self.rule(Constraint::MinLength(min))
    }

    pub const fn is_array(self, min: usize) -> FieldRule {
        self.rule(Constraint::IsArrayMinSize(min))
    }
}
