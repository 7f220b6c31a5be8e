//! Time-based cache with per-entry expiry.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    stored_at: Instant,
}

impl<V> Slot<V> {
    fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

/// A thread-safe map whose entries expire after a fixed TTL.
///
/// Clones share storage. Values are cloned out on every hit, so large
/// values such as table snapshots should be stored behind an `Arc`:
/// ```
/// use fleet_mcp_server::TimedCache;
/// use std::sync::Arc;
///
/// let cache: TimedCache<&str, Arc<Vec<u32>>> = TimedCache::new(60);
/// cache.insert("parts", Arc::new(vec![1, 2, 3]));
/// assert_eq!(cache.get(&"parts").map(|v| v.len()), Some(3));
/// ```
#[derive(Clone)]
pub struct TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    slots: Arc<RwLock<HashMap<K, Slot<V>>>>,
    ttl: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache whose entries live for `ttl_seconds`.
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_ttl(Duration::from_secs(ttl_seconds))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Store `value`, replacing any previous entry and restarting its clock.
    pub fn insert(&self, key: K, value: V) {
        let slot = Slot {
            value,
            stored_at: Instant::now(),
        };

        if let Ok(mut slots) = self.slots.write() {
            slots.insert(key, slot);
        }
    }

    /// Live value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let slots = self.slots.read().ok()?;
        slots
            .get(key)
            .filter(|slot| slot.is_live(now, self.ttl))
            .map(|slot| slot.value.clone())
    }

    /// Drop the entry for `key`. Called after writes that make it stale.
    pub fn invalidate(&self, key: &K) {
        if let Ok(mut slots) = self.slots.write() {
            slots.remove(key);
        }
    }

    /// Remove expired entries. Lookups already ignore them.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        let ttl = self.ttl;
        if let Ok(mut slots) = self.slots.write() {
            slots.retain(|_, slot| slot.is_live(now, ttl));
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.slots.read().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> std::fmt::Debug for TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
