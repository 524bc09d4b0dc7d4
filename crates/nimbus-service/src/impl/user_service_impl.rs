//! User service implementation.

use crate::dto::{RegisterUserRequest, UserListResponse, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use nimbus_core::{Email, NimbusError, NimbusResult, User, ValidateExt};
use nimbus_store::UserStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Minimum age required to register.
pub const MINIMUM_REGISTRATION_AGE: i64 = 18;

/// User service implementation over the store contract.
///
/// In production the store is the cache-aside proxy; the service cannot
/// tell and does not care.
pub struct UserServiceImpl<S: UserStore> {
    user_store: Arc<S>,
}

impl<S: UserStore> UserServiceImpl<S> {
    /// Creates a new user service.
    pub fn new(user_store: Arc<S>) -> Self {
        Self { user_store }
    }
}

#[async_trait]
impl<S: UserStore + 'static> UserService for UserServiceImpl<S> {
    async fn register_user(&self, request: RegisterUserRequest) -> NimbusResult<UserResponse> {
        debug!("Registering user: {}", request.email);

        // Validate request shape
        request.validate_request()?;

        if request.age < MINIMUM_REGISTRATION_AGE {
            return Err(NimbusError::BusinessRule(format!(
                "Users must be at least {} years old to register",
                MINIMUM_REGISTRATION_AGE
            )));
        }

        // Check for existing email
        if self.user_store.find_by_email(&request.email).await?.is_some() {
            return Err(NimbusError::Conflict(format!(
                "A user with email '{}' is already registered",
                request.email
            )));
        }

        let email = Email::new(&request.email).map_err(|e| NimbusError::Validation(e.to_string()))?;

        let user = User::new(email, request.password, request.name, request.age);

        self.user_store.create(&user).await?;

        info!("User registered: {}", user.email);
        Ok(UserResponse::from(user))
    }

    async fn list_users(&self) -> NimbusResult<UserListResponse> {
        debug!("Listing users");

        let users = self.user_store.list().await?;
        Ok(UserListResponse::from(users))
    }
}

impl<S: UserStore> std::fmt::Debug for UserServiceImpl<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
