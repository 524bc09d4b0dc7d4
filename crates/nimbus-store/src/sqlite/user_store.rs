//! SQLite user store implementation.

use crate::{pool::DatabasePool, traits::UserStore};
use async_trait::async_trait;
use nimbus_core::{Email, NimbusResult, User};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// SQLite user store implementation.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: Arc<DatabasePool>,
}

impl SqliteUserStore {
    /// Creates a new SQLite user store.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    email: String,
    password: String,
    name: String,
    age: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            email: Email::new_unchecked(row.email),
            password: row.password,
            name: row.name,
            age: row.age,
        }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create(&self, user: &User) -> NimbusResult<()> {
        debug!("Store: create user {}", user.email);

        sqlx::query(
            r#"
            INSERT INTO users (email, password, name, age)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password)
        .bind(&user.name)
        .bind(user.age)
        .execute(self.pool.inner())
        .await?;

        Ok(())
    }

    async fn list(&self) -> NimbusResult<Vec<User>> {
        debug!("Store: list users");

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, password, name, age
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> NimbusResult<Option<User>> {
        debug!("Store: find user by email {}", email);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, password, name, age
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }
}

impl std::fmt::Debug for SqliteUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteUserStore").finish_non_exhaustive()
    }
}
