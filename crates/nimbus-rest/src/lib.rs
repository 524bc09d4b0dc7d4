//! # Nimbus REST
//!
//! REST API layer using Axum for Nimbus Users.
//! Provides HTTP endpoints for user registration, user listing, and health
//! checks.

pub mod controllers;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
