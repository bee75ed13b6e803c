//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (validated JSON body, URL params)
//! 2. Delegates to a business collaborator
//! 3. Returns HTTP response (JSON, status code)

/// Service health endpoint
pub mod health;
/// User management endpoints
pub mod users;
