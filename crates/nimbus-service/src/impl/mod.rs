//! Service implementations.

mod user_service_impl;

pub use user_service_impl::{UserServiceImpl, MINIMUM_REGISTRATION_AGE};
