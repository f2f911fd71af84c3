//! Explicit time-stamped cache for a single value.
//!
//! Replaces ambient module-level "last fetched" state: the value, the moment
//! it was fetched, and the TTL all live in one owned struct with an explicit
//! [`TimedCache::invalidate`] call.

use std::future::Future;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

/// A cached value stamped with the moment it was stored.
#[derive(Debug, Clone)]
struct Stamped<T> {
    value: T,
    stored_at: Instant,
}

#[derive(Debug)]
struct Slot<T> {
    entry: Option<Stamped<T>>,
    /// Bumped by every invalidation.
    generation: u64,
}

/// Single-slot cache with a fixed time-to-live.
#[derive(Debug)]
pub struct TimedCache<T> {
    ttl: Duration,
    slot: RwLock<Slot<T>>,
}

impl<T: Clone> TimedCache<T> {
    /// Creates an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(Slot {
                entry: None,
                generation: 0,
            }),
        }
    }

    /// Returns the cached value if it is still fresh.
    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.read().await;
        self.fresh(&slot)
    }

    /// Stores a value, stamping it with the current instant.
    pub async fn put(&self, value: T) {
        let mut slot = self.slot.write().await;
        slot.entry = Some(Stamped {
            value,
            stored_at: Instant::now(),
        });
    }

    /// Drops the cached value so the next read goes to the source.
    ///
    /// A refresh that started before this call does not store its result.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.entry = None;
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Returns the fresh cached value, or fetches, stores and returns a new one.
    ///
    /// A failed fetch leaves the cache untouched. When the cache is
    /// invalidated while `fetch` runs, the fetched value is returned to the
    /// caller but not stored.
    pub async fn get_or_try_refresh<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let generation = {
            let slot = self.slot.read().await;
            if let Some(value) = self.fresh(&slot) {
                return Ok(value);
            }
            slot.generation
        };

        let value = fetch().await?;

        let mut slot = self.slot.write().await;
        if slot.generation == generation {
            slot.entry = Some(Stamped {
                value: value.clone(),
                stored_at: Instant::now(),
            });
        }
        Ok(value)
    }

    fn fresh(&self, slot: &Slot<T>) -> Option<T> {
        slot.entry
            .as_ref()
            .filter(|stamped| stamped.stored_at.elapsed() < self.ttl)
            .map(|stamped| stamped.value.clone())
    }
}
