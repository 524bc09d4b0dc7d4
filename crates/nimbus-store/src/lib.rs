//! # Nimbus Store
//!
//! Data access layer for Nimbus Users:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserStore>   (store contract)
//! CachedUserStore           (cache-aside proxy — same contract)
//!   ↓  Arc<dyn UserStore>
//! SqliteUserStore           (SQLx / SQLite)
//!   ↓
//! SQLite
//! ```
//!
//! The proxy implements the same [`UserStore`] contract it consumes, so
//! callers cannot tell whether a result came from the in-memory cache or
//! from the database.

pub mod cache;
pub mod pool;
pub mod sqlite;
pub mod traits;

pub use cache::{CachedUserStore, UserCache};
pub use pool::*;
pub use sqlite::SqliteUserStore;
pub use traits::UserStore;
