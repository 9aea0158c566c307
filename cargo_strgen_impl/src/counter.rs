// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

///
/// How many times each artifact key has been emitted in this process.
///
/// Informational only. Shared by reference (usually an `Arc`) between
/// emitters; every read-increment-write happens under the lock.
///
#[derive(Debug, Default)]
pub struct GenerationCounter {
    counts: Mutex<HashMap<String, u64>>,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the count for `key` and return the new value
    pub fn increment(&self, key: &str) -> u64 {
        let mut counts = self.lock();
        let count = counts.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Current count for `key`; zero if it was never emitted
    pub fn get(&self, key: &str) -> u64 {
        self.lock().get(key).copied().unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        // A panic elsewhere can't leave a half-written count behind
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
