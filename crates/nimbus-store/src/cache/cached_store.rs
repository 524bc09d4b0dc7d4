//! Cache-aside proxy over the user store contract.

use super::user_cache::UserCache;
use crate::traits::UserStore;
use async_trait::async_trait;
use nimbus_core::{NimbusResult, User};
use std::sync::Arc;
use tracing::debug;

/// Cache-aside proxy implementing [`UserStore`] over a wrapped store.
///
/// After any successful `create` or `find_by_email` that resolves via the
/// wrapped store, the cache holds an entry for that email equal to what the
/// store held at that moment. The cache is only touched before or after a
/// completed store call, never while one is in flight, so no lock is held
/// across store I/O.
///
/// A row mutated directly in the store after being cached will appear stale
/// until the process restarts or the email is rewritten through `create` —
/// an accepted staleness window.
pub struct CachedUserStore {
    store: Arc<dyn UserStore>,
    cache: UserCache,
}

impl CachedUserStore {
    /// Creates a proxy around the given store with an empty cache.
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            cache: UserCache::new(),
        }
    }

    /// Returns the cache backing this proxy.
    #[must_use]
    pub fn cache(&self) -> &UserCache {
        &self.cache
    }
}

#[async_trait]
impl UserStore for CachedUserStore {
    async fn create(&self, user: &User) -> NimbusResult<()> {
        self.store.create(user).await?;

        // Store accepted the write; mirror it. On failure the `?` above has
        // already returned and the cache is untouched.
        self.cache.set(user.email.as_str(), user.clone());
        Ok(())
    }

    async fn list(&self) -> NimbusResult<Vec<User>> {
        let cached = self.cache.list();
        if !cached.is_empty() {
            debug!("Cache hit for user list ({} entries)", cached.len());
            return Ok(cached);
        }

        // An empty cache is indistinguishable from an empty store, so a
        // freshly started system with zero users re-queries the store on
        // every list call until the first user exists.
        let users = self.store.list().await?;
        for user in &users {
            self.cache.set(user.email.as_str(), user.clone());
        }
        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> NimbusResult<Option<User>> {
        if let Some(user) = self.cache.get(email) {
            debug!("Cache hit for user {}", email);
            return Ok(Some(user));
        }

        match self.store.find_by_email(email).await? {
            Some(user) => {
                self.cache.set(email, user.clone());
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for CachedUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedUserStore")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::{Email, NimbusError};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory store that counts how often each operation hits it.
    struct CountingStore {
        users: Mutex<HashMap<String, User>>,
        create_calls: AtomicUsize,
        list_calls: AtomicUsize,
        find_calls: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                create_calls: AtomicUsize::new(0),
                list_calls: AtomicUsize::new(0),
                find_calls: AtomicUsize::new(0),
            }
        }

        fn with_users(users: Vec<User>) -> Self {
            let store = Self::new();
            {
                let mut map = store.users.lock().unwrap();
                for user in users {
                    map.insert(user.email.as_str().to_string(), user);
                }
            }
            store
        }

        fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn find_calls(&self) -> usize {
            self.find_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserStore for CountingStore {
        async fn create(&self, user: &User) -> NimbusResult<()> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.users
                .lock()
                .unwrap()
                .insert(user.email.as_str().to_string(), user.clone());
            Ok(())
        }

        async fn list(&self) -> NimbusResult<Vec<User>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.users.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_email(&self, email: &str) -> NimbusResult<Option<User>> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.users.lock().unwrap().get(email).cloned())
        }
    }

    /// Store whose every operation fails with a database error.
    struct FailingStore;

    #[async_trait]
    impl UserStore for FailingStore {
        async fn create(&self, _user: &User) -> NimbusResult<()> {
            Err(NimbusError::Database("connection refused".to_string()))
        }

        async fn list(&self) -> NimbusResult<Vec<User>> {
            Err(NimbusError::Database("connection refused".to_string()))
        }

        async fn find_by_email(&self, _email: &str) -> NimbusResult<Option<User>> {
            Err(NimbusError::Database("connection refused".to_string()))
        }
    }

    fn create_user(email: &str, name: &str) -> User {
        User::new(
            Email::new_unchecked(email),
            "secret".to_string(),
            name.to_string(),
            25,
        )
    }

    #[tokio::test]
    async fn test_create_delegates_and_populates_cache() {
        let store = Arc::new(CountingStore::new());
        let proxy = CachedUserStore::new(store.clone());

        let user = create_user("a@example.com", "Alice");
        proxy.create(&user).await.unwrap();

        assert_eq!(store.create_calls(), 1);
        assert_eq!(proxy.cache().len(), 1);

        // The freshly created user resolves from cache without a store hit.
        let found = proxy.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found, user);
        assert_eq!(store.find_calls(), 0);
    }

    #[tokio::test]
    async fn test_find_miss_populates_cache_once() {
        let seeded = create_user("b@example.com", "Bob");
        let store = Arc::new(CountingStore::with_users(vec![seeded.clone()]));
        let proxy = CachedUserStore::new(store.clone());

        let first = proxy.find_by_email("b@example.com").await.unwrap();
        assert_eq!(first, Some(seeded.clone()));
        assert_eq!(store.find_calls(), 1);

        // Identical second lookup makes zero additional store calls.
        let second = proxy.find_by_email("b@example.com").await.unwrap();
        assert_eq!(second, Some(seeded));
        assert_eq!(store.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_find_not_found_is_none_not_error() {
        let store = Arc::new(CountingStore::new());
        let proxy = CachedUserStore::new(store.clone());

        let result = proxy.find_by_email("ghost@example.com").await.unwrap();
        assert!(result.is_none());
        assert!(proxy.cache().is_empty());

        // Absence is not cached; the next lookup asks the store again.
        let result = proxy.find_by_email("ghost@example.com").await.unwrap();
        assert!(result.is_none());
        assert_eq!(store.find_calls(), 2);
    }

    #[tokio::test]
    async fn test_list_cold_start_requeries_empty_store() {
        let store = Arc::new(CountingStore::new());
        let proxy = CachedUserStore::new(store.clone());

        assert!(proxy.list().await.unwrap().is_empty());
        assert!(proxy.list().await.unwrap().is_empty());

        // Zero users leaves the cache cold, so both calls hit the store.
        assert_eq!(store.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_list_populates_cache_and_stops_requerying() {
        let users = vec![
            create_user("a@example.com", "Alice"),
            create_user("b@example.com", "Bob"),
        ];
        let store = Arc::new(CountingStore::with_users(users));
        let proxy = CachedUserStore::new(store.clone());

        let first = proxy.list().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(store.list_calls(), 1);
        assert_eq!(proxy.cache().len(), 2);

        let second = proxy.list().await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_warm_after_create_never_hits_store() {
        let store = Arc::new(CountingStore::new());
        let proxy = CachedUserStore::new(store.clone());

        proxy.create(&create_user("a@example.com", "Alice")).await.unwrap();

        for _ in 0..3 {
            let listed = proxy.list().await.unwrap();
            assert_eq!(listed.len(), 1);
        }
        assert_eq!(store.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_cached_lookup_is_stale_after_out_of_band_store_write() {
        let original = create_user("c@example.com", "Carol");
        let store = Arc::new(CountingStore::with_users(vec![original.clone()]));
        let proxy = CachedUserStore::new(store.clone());

        assert_eq!(
            proxy.find_by_email("c@example.com").await.unwrap().unwrap().name,
            "Carol"
        );

        // Mutate the store directly, bypassing the proxy.
        store
            .users
            .lock()
            .unwrap()
            .insert("c@example.com".to_string(), create_user("c@example.com", "Caroline"));

        // The proxy keeps serving the cached copy.
        assert_eq!(
            proxy.find_by_email("c@example.com").await.unwrap().unwrap().name,
            "Carol"
        );
        assert_eq!(store.find_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_overwrites_cached_entry() {
        let store = Arc::new(CountingStore::new());
        let proxy = CachedUserStore::new(store.clone());

        proxy.create(&create_user("a@example.com", "Alice")).await.unwrap();
        proxy.create(&create_user("a@example.com", "Alicia")).await.unwrap();

        let found = proxy.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.name, "Alicia");
        assert_eq!(proxy.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_cache_untouched() {
        let proxy = CachedUserStore::new(Arc::new(FailingStore));

        let err = proxy
            .create(&create_user("a@example.com", "Alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, NimbusError::Database(_)));
        assert!(proxy.cache().is_empty());
    }

    #[tokio::test]
    async fn test_find_failure_propagates_untouched() {
        let proxy = CachedUserStore::new(Arc::new(FailingStore));

        let err = proxy.find_by_email("a@example.com").await.unwrap_err();
        match err {
            NimbusError::Database(msg) => assert_eq!(msg, "connection refused"),
            _ => panic!("Expected Database error"),
        }
        assert!(proxy.cache().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_is_not_masked_as_empty() {
        let proxy = CachedUserStore::new(Arc::new(FailingStore));

        let result = proxy.list().await;
        assert!(result.is_err());
        assert!(proxy.cache().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_all_visible_to_list() {
        let store = Arc::new(CountingStore::new());
        let proxy = Arc::new(CachedUserStore::new(store.clone()));
        let writers = 16;

        let mut handles = Vec::new();
        for i in 0..writers {
            let proxy = Arc::clone(&proxy);
            handles.push(tokio::spawn(async move {
                let email = format!("user{}@example.com", i);
                proxy.create(&create_user(&email, &format!("User {}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let listed = proxy.list().await.unwrap();
        assert_eq!(listed.len(), writers);
        // The cache was warm for the whole run, so list never hit the store.
        assert_eq!(store.list_calls(), 0);
    }
}
