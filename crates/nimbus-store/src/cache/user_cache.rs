//! Concurrency-safe in-memory user cache.

use nimbus_core::User;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory mapping from email to user.
///
/// Unbounded and non-expiring: entries are created on first population and
/// overwritten on repeated writes, never deleted. Any number of readers may
/// proceed together; a writer excludes all other access for the duration of
/// the insert.
#[derive(Default)]
pub struct UserCache {
    users: RwLock<HashMap<String, User>>,
}

impl UserCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached user for the given email, if present.
    #[must_use]
    pub fn get(&self, email: &str) -> Option<User> {
        self.users.read().get(email).cloned()
    }

    /// Inserts or overwrites the entry for the given email. Last writer wins.
    pub fn set(&self, email: &str, user: User) {
        self.users.write().insert(email.to_string(), user);
    }

    /// Returns a point-in-time snapshot of all entries, in unspecified order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.users.read().values().cloned().collect()
    }

    /// Returns the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl std::fmt::Debug for UserCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCache").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::Email;
    use std::sync::Arc;

    fn create_user(email: &str, name: &str) -> User {
        User::new(
            Email::new_unchecked(email),
            "secret".to_string(),
            name.to_string(),
            30,
        )
    }

    #[test]
    fn test_get_missing_returns_none() {
        let cache = UserCache::new();
        assert!(cache.get("absent@example.com").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let cache = UserCache::new();
        cache.set("a@example.com", create_user("a@example.com", "Alice"));

        let user = cache.get("a@example.com").expect("cached user");
        assert_eq!(user.name, "Alice");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_overwrites_existing_entry() {
        let cache = UserCache::new();
        cache.set("a@example.com", create_user("a@example.com", "Alice"));
        cache.set("a@example.com", create_user("a@example.com", "Alicia"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a@example.com").unwrap().name, "Alicia");
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let cache = UserCache::new();
        cache.set("a@example.com", create_user("a@example.com", "Alice"));

        assert!(cache.get("A@example.com").is_none());
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let cache = UserCache::new();
        cache.set("a@example.com", create_user("a@example.com", "Alice"));

        let snapshot = cache.list();
        cache.set("b@example.com", create_user("b@example.com", "Bob"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_writers_with_distinct_emails_all_visible() {
        let cache = Arc::new(UserCache::new());
        let writers = 32;

        let handles: Vec<_> = (0..writers)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let email = format!("user{}@example.com", i);
                    cache.set(&email, create_user(&email, &format!("User {}", i)));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = cache.list();
        assert_eq!(snapshot.len(), writers);
        for i in 0..writers {
            let email = format!("user{}@example.com", i);
            assert!(cache.get(&email).is_some(), "missing entry for {}", email);
        }
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let cache = Arc::new(UserCache::new());
        cache.set("seed@example.com", create_user("seed@example.com", "Seed"));

        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                let email = format!("writer{}@example.com", i);
                cache.set(&email, create_user(&email, "W"));
            }));
        }
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                let _ = cache.get("seed@example.com");
                let _ = cache.list();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 9);
    }
}
