//! Per-user conversion counters.
//!
//! The store is a capability injected into the gateway at process start,
//! never a module-level global. The interface is deliberately narrow: one
//! mutation path (`record_success`, called by the gateway after a successful
//! conversion and nowhere else) and one read path. Any key-counter backend
//! can implement it; the in-memory store covers single-process deployment.

use std::collections::HashMap;
use std::sync::Mutex;

/// Capability for recording and reading per-user conversion counts.
pub trait StatsStore: Send + Sync {
    /// Record one successful conversion for `user_id`.
    fn record_success(&self, user_id: u64);

    /// Number of successful conversions recorded for `user_id`.
    fn get_count(&self, user_id: u64) -> u64;
}

/// Mutex-guarded in-memory store; counts live for the process lifetime.
#[derive(Debug, Default)]
pub struct InMemoryStats {
    counts: Mutex<HashMap<u64, u64>>,
}

impl InMemoryStats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for InMemoryStats {
    fn record_success(&self, user_id: u64) {
        let mut counts = self.counts.lock().expect("stats mutex poisoned");
        *counts.entry(user_id).or_insert(0) += 1;
    }

    fn get_count(&self, user_id: u64) -> u64 {
        self.counts
            .lock()
            .expect("stats mutex poisoned")
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn unknown_user_has_zero_count() {
        let stats = InMemoryStats::new();
        assert_eq!(stats.get_count(42), 0);
    }

    #[test]
    fn counts_increment_per_user() {
        let stats = InMemoryStats::new();
        stats.record_success(1);
        stats.record_success(1);
        stats.record_success(2);
        assert_eq!(stats.get_count(1), 2);
        assert_eq!(stats.get_count(2), 1);
        assert_eq!(stats.get_count(3), 0);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let stats = Arc::new(InMemoryStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.record_success(7);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(stats.get_count(7), 800);
    }
}
