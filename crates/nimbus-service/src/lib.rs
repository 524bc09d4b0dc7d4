//! # Nimbus Service
//!
//! Business logic service layer for Nimbus Users.
//! Enforces the registration rules on top of the store contract; whether
//! that contract is served by the cache proxy or the raw store is invisible
//! here.

pub mod dto;
pub mod user_service;
pub mod r#impl;

pub use dto::*;
pub use r#impl::{UserServiceImpl, MINIMUM_REGISTRATION_AGE};
pub use user_service::*;
