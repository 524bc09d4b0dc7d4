//! User service trait definition.

use crate::dto::{RegisterUserRequest, UserListResponse, UserResponse};
use async_trait::async_trait;
use nimbus_core::NimbusResult;

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new user.
    async fn register_user(&self, request: RegisterUserRequest) -> NimbusResult<UserResponse>;

    /// Lists all users.
    async fn list_users(&self) -> NimbusResult<UserListResponse>;
}
