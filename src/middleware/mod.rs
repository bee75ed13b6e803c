//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Validate requests
//! - Short-circuit requests (reject invalid input)

/// Field-rule validation gate
pub mod validate;
