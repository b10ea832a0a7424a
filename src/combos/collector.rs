//! Thread-safe, content-keyed result accumulation

use super::{Combination, ResultSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Set of accepted combinations shared by all producers of one search.
///
/// Equality is by content, so the same values reached through different index
/// paths occupy a single entry.
#[derive(Debug, Default)]
pub struct ResultCollector {
    entries: Mutex<ResultSet>,
    accepted: AtomicU64,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted combination. Returns `false` if an equal one was already present.
    pub fn insert(&self, combination: Combination) -> bool {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(combination)
    }

    /// Accepted inserts, duplicates included
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn into_set(self) -> ResultSet {
        self.entries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // A panicking producer cannot leave a half-inserted entry behind, so a poisoned set is still valid.
    fn lock(&self) -> MutexGuard<'_, ResultSet> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
