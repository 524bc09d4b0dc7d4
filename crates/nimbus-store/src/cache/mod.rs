//! In-memory caching for the user store.
//!
//! [`UserCache`] is an unbounded, non-expiring map from email to user,
//! safe for concurrent access. [`CachedUserStore`] interposes it in front
//! of any [`UserStore`](crate::UserStore) implementation without changing
//! the contract.

mod cached_store;
mod user_cache;

pub use cached_store::CachedUserStore;
pub use user_cache::UserCache;
