//! Data models for the user routes.
//!
//! This module contains the typed request bodies and the response type
//! returned by the business collaborators.

/// Typed user request bodies
pub mod user;
/// Relayed business response
pub mod response;
