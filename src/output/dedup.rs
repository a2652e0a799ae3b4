// Domain Deduplicator - Shared set of names already emitted
//
// The only operation is an atomic insert-if-absent. No separate membership
// check is exposed.

use std::collections::HashSet;
use std::sync::Mutex;

/// Concurrency-safe set of emitted domains
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: Mutex<HashSet<String>>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `domain`; returns true if it was not present before
    ///
    /// Domains are compared case-insensitively. The lock is held only for the
    /// set operation itself.
    pub fn insert_if_absent(&self, domain: &str) -> bool {
        let key = domain.to_ascii_lowercase();
        // HashSet::insert cannot leave the set half-updated, so poisoning is ignored
        let mut seen = self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        seen.insert(key)
    }

    /// Number of distinct domains recorded
    pub fn len(&self) -> usize {
        self.seen
            .lock()
            .map(|seen| seen.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
