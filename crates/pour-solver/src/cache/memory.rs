use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::{SolutionCache, DEFAULT_TTL};
use crate::solver::{Puzzle, Solution};

struct Entry {
    solution: Arc<Solution>,
    /// `None` when the TTL reaches past what an `Instant` can represent
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

/// In-process cache that forgets entries after a fixed time-to-live
///
/// Nothing is persisted; the cache lives as long as its owner.
pub struct MemoryCache {
    entries: Mutex<HashMap<Puzzle, Entry>>,
    /// Lifetime of each entry, counted from insertion
    ttl: Duration,
    /// Whether the cache stores and serves entries at all
    enabled: bool,
}

impl MemoryCache {
    /// Create a cache whose entries expire `ttl` after being stored
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use pour_solver::cache::MemoryCache;
    ///
    /// let cache = MemoryCache::new(Duration::from_secs(600));
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            enabled: true,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Set whether cache is enabled
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drop the entry for `key`, if any
    pub fn remove(&self, key: &Puzzle) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict all expired entries
    ///
    /// # Returns
    /// Number of entries removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();

        entries.retain(|_, entry| entry.is_live(now));

        let purged = before - entries.len();
        if purged > 0 {
            log::debug!("Purged {} expired solutions", purged);
        }
        purged
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Puzzle, Entry>> {
        // A panic while holding the lock cannot leave a half-written entry behind
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SolutionCache for MemoryCache {
    fn get(&self, key: &Puzzle) -> Option<Arc<Solution>> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let mut entries = self.lock();

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(Arc::clone(&entry.solution)),
            Some(_) => {
                log::trace!("Solution for {} expired", key);
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert(&self, key: Puzzle, solution: Arc<Solution>) {
        if !self.enabled {
            return;
        }

        let entry = Entry {
            solution,
            expires_at: Instant::now().checked_add(self.ttl),
        };
        self.lock().insert(key, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, Action, Step};
    use std::thread;

    fn puzzle() -> Puzzle {
        Puzzle::new(3, 5, 4).unwrap()
    }

    fn solution() -> Arc<Solution> {
        Arc::new(solve(puzzle()).unwrap())
    }

    #[test]
    fn test_cache_new() {
        let cache = MemoryCache::new(Duration::from_secs(60));

        assert_eq!(cache.ttl(), Duration::from_secs(60));
        assert!(cache.is_enabled());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_default_ttl_is_ten_minutes() {
        assert_eq!(MemoryCache::default().ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_cache_insert_get() {
        let cache = MemoryCache::default();
        let stored = solution();

        assert!(cache.get(&puzzle()).is_none());

        cache.insert(puzzle(), Arc::clone(&stored));
        let cached = cache.get(&puzzle()).unwrap();

        assert!(Arc::ptr_eq(&cached, &stored));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_keys_are_distinct() {
        let cache = MemoryCache::default();
        cache.insert(puzzle(), solution());

        assert!(cache.get(&Puzzle::new(5, 3, 4).unwrap()).is_none());
        assert!(cache.get(&Puzzle::new(3, 5, 1).unwrap()).is_none());
    }

    #[test]
    fn test_cache_last_insert_wins() {
        let cache = MemoryCache::default();
        let replacement = Arc::new(vec![Step {
            step: 1,
            bucket_x: 0,
            bucket_y: 5,
            action: Action::FillY,
            status: None,
        }]);

        cache.insert(puzzle(), solution());
        cache.insert(puzzle(), Arc::clone(&replacement));

        assert_eq!(cache.get(&puzzle()).unwrap(), replacement);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_entry_expires() {
        let cache = MemoryCache::new(Duration::from_millis(50));
        cache.insert(puzzle(), solution());

        assert!(cache.get(&puzzle()).is_some());

        thread::sleep(Duration::from_millis(100));

        assert!(cache.get(&puzzle()).is_none());
        // Expired entry is evicted on lookup
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_entry_with_huge_ttl_never_expires() {
        let cache = MemoryCache::new(Duration::from_secs(u64::MAX));
        cache.insert(puzzle(), solution());

        assert!(cache.get(&puzzle()).is_some());
        assert_eq!(cache.purge_expired(), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_purge_expired() {
        let cache = MemoryCache::new(Duration::from_millis(50));
        cache.insert(puzzle(), solution());

        thread::sleep(Duration::from_millis(100));

        cache.insert(Puzzle::new(2, 3, 1).unwrap(), solution());

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&puzzle()).is_none());
        assert!(cache.get(&Puzzle::new(2, 3, 1).unwrap()).is_some());
    }

    #[test]
    fn test_cache_remove_and_clear() {
        let cache = MemoryCache::default();
        cache.insert(puzzle(), solution());
        cache.insert(Puzzle::new(2, 3, 1).unwrap(), solution());

        assert!(cache.remove(&puzzle()));
        assert!(!cache.remove(&puzzle()));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_disabled() {
        let mut cache = MemoryCache::default();
        cache.set_enabled(false);

        cache.insert(puzzle(), solution());

        assert!(!cache.is_enabled());
        assert!(cache.get(&puzzle()).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_concurrent_inserts() {
        let cache = Arc::new(MemoryCache::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    cache.insert(puzzle(), solution());
                    cache.get(&puzzle()).unwrap()
                })
            })
            .collect();

        let expected = solve(puzzle()).unwrap();
        for handle in handles {
            assert_eq!(*handle.join().unwrap(), expected);
        }
        assert_eq!(cache.len(), 1);
    }
}
