//! Store trait definitions.

use async_trait::async_trait;
use nimbus_core::{NimbusResult, User};

/// User store contract.
///
/// Implemented by the SQLite-backed store and by the cache-aside proxy that
/// wraps it; consumers hold an `Arc<dyn UserStore>` and cannot tell the two
/// apart.
///
/// A lookup miss is not an error: `find_by_email` resolves to `Ok(None)`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user.
    async fn create(&self, user: &User) -> NimbusResult<()>;

    /// Returns all users.
    async fn list(&self) -> NimbusResult<Vec<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> NimbusResult<Option<User>>;
}
