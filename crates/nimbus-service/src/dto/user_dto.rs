//! User-related DTOs.

use nimbus_core::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,

    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(range(min = 0, max = 150, message = "Age must be 0-150"))]
    pub age: i64,
}

/// User response DTO. The password never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
    pub age: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email.to_string(),
            name: user.name,
            age: user.age,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.to_string(),
            name: user.name.clone(),
            age: user.age,
        }
    }
}

/// User list response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
        Self {
            total: users.len(),
            users,
        }
    }
}
