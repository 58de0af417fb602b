//! Per-identifier mutual exclusion for check-then-act sequences.
//!
//! Both flows read a record, decide, and write back; two concurrent requests
//! for the same email would otherwise race on the rate-limit check and the
//! attempt counter. Operations on different keys stay independent.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-key async mutexes.
///
/// Entries are created lazily and never removed; the population is bounded
/// by the set of identifiers legitimately in flight, same as the store
/// itself.
#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, waiting if another request for the same
    /// key holds it. The guard releases on drop.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
