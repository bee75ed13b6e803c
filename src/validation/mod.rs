//! Declarative request validation.
//!
//! Routes describe their inputs as lists of [`FieldRule`]s. A
//! [`ValidationGate`] evaluates such a list against a [`RequestInput`] and
//! returns every failure in a [`result::ValidationResult`].

pub mod gate;
pub mod result;
pub mod rules;

pub use gate::{RequestInput, ValidationGate};
pub use result::FieldError;
pub use rules::FieldRule;
