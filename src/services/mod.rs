//! Business logic services.
//!
//! The gateway validates and routes; the services here are where validated
//! requests go next.

pub mod controllers;
pub mod upstream;
