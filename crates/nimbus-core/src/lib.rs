//! # Nimbus Core
//!
//! Core types, domain model, and error definitions for Nimbus Users.
//! This crate provides the foundational abstractions shared by the store,
//! service, and REST layers.

pub mod domain;
pub mod error;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use result::*;
pub use validation::*;
