//! User entity.

use super::email::Email;
use serde::{Deserialize, Serialize};

/// User entity representing a registered user.
///
/// The email is the user's identity; no two persisted users share one.
/// The password is an opaque string and is never serialized into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique email address identifying the user.
    pub email: Email,

    /// Opaque password (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password: String,

    /// User's display name.
    pub name: String,

    /// User's age in years.
    pub age: i64,
}

impl User {
    /// Creates a new user with the given details.
    #[must_use]
    pub fn new(email: Email, password: String, name: String, age: i64) -> Self {
        Self {
            email,
            password,
            name,
            age,
        }
    }

    /// Returns the user's email as a string slice.
    #[must_use]
    pub fn email_str(&self) -> &str {
        self.email.as_str()
    }
}
