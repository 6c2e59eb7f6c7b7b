//! Shared cache of primed hasher states.
//!
//! Keeps one [`CachedState`] per tag/key so that many workers can fetch
//! independent clones of a prefix that was absorbed exactly once.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::cached::CachedState;
use crate::engine::Sha256;

// =============================================================================
// Cache Key
// =============================================================================

/// Cache key, typically the tag string the state was primed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(Arc<str>);

impl CacheKey {
    /// Create a new cache key.
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// State Cache
// =============================================================================

/// Non-thread-safe cache of primed states.
pub type StateCache = FxHashMap<CacheKey, CachedState>;

/// Thread-safe shared cache of primed states.
///
/// Uses `parking_lot::RwLock` for better performance under contention.
/// Lookups hand out clones, never references into the map, so a fetched
/// state can be absorbed into without holding any lock.
#[derive(Debug)]
pub struct SharedStateCache {
    inner: Arc<RwLock<StateCache>>,
}

impl Clone for SharedStateCache {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for SharedStateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStateCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(FxHashMap::default())),
        }
    }

    /// Execute a closure with read access to the cache.
    pub fn with_read<R>(&self, f: impl FnOnce(&StateCache) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with write access to the cache.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut StateCache) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Absorb `prefix` once, label the snapshot with the key, cache it, and
    /// return it.
    pub fn prime(&self, key: CacheKey, prefix: &[u8]) -> CachedState {
        let mut hasher = Sha256::new();
        let cached = hasher.update_and_cache(prefix).with_label(key.as_str());
        self.insert(key, cached.clone());
        cached
    }

    /// Get a clone of a cached state.
    pub fn get(&self, key: &CacheKey) -> Option<CachedState> {
        self.with_read(|c| c.get(key).cloned())
    }

    /// Insert or replace a cached state.
    pub fn insert(&self, key: CacheKey, state: CachedState) {
        self.with_write(|c| {
            c.insert(key, state);
        });
    }

    /// Remove a state from the cache.
    pub fn remove(&self, key: &CacheKey) -> Option<CachedState> {
        self.with_write(|c| c.remove(key))
    }

    /// Check if the cache contains a key.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.with_read(|c| c.contains_key(key))
    }

    /// Get the number of cached states.
    pub fn len(&self) -> usize {
        self.with_read(|c| c.len())
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all cached states.
    pub fn clear(&self) {
        self.with_write(|c| c.clear());
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key() {
        let key = CacheKey::new("BIP0340/challenge");
        assert_eq!(key.as_str(), "BIP0340/challenge");
        assert_eq!(key.to_string(), "BIP0340/challenge");
    }

    #[test]
    fn test_shared_cache() {
        let cache = SharedStateCache::new();
        let cached = cache.prime(CacheKey::new("tag"), &[0u8; 64]);
        assert_eq!(cached.label(), Some("tag"));

        assert!(cache.contains(&CacheKey::new("tag")));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&CacheKey::new("tag")).unwrap(), cached);

        cache.remove(&CacheKey::new("tag"));
        assert!(!cache.contains(&CacheKey::new("tag")));
        assert!(cache.is_empty());
    }

    // Independent clones may be absorbed into concurrently; nothing is
    // shared once a state leaves the cache.
    #[test]
    fn test_clones_across_threads() {
        let cache = SharedStateCache::new();
        cache.prime(CacheKey::new("shared"), &[0x5a; 64]);

        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    let cached = cache.get(&CacheKey::new("shared")).unwrap();
                    let suffix = vec![i; 10 + i as usize];
                    (cached.hash_suffix(&suffix), suffix)
                })
            })
            .collect();

        for handle in handles {
            let (digest, suffix) = handle.join().unwrap();
            let mut whole = vec![0x5a; 64];
            whole.extend_from_slice(&suffix);
            assert_eq!(digest, Sha256::hash(&whole));
        }
    }
}
