//! Controller counters
//!
//! Counters only, monotonic, reset when a controller is created. They are
//! passive: nothing in the admission path reads them.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Operational counters for one controller
///
/// Relaxed ordering throughout; every increment already happens under the
/// intersection lock, and readers only need eventually exact values.
#[derive(Debug, Default)]
pub struct ControllerMetrics {
    /// `before_entry` calls that returned
    admissions: AtomicU64,
    /// Admissions that had to wait at least once
    blocked_entries: AtomicU64,
    /// Returns from a condition-variable wait
    wakeups: AtomicU64,
    /// Wakeups after which the waiter still could not enter
    redundant_wakeups: AtomicU64,
    /// Broadcasts issued by `after_exit`
    broadcasts: AtomicU64,
    /// Successful `after_exit` calls
    exits: AtomicU64,
}

impl ControllerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_admissions(&self) {
        self.admissions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_blocked_entries(&self) {
        self.blocked_entries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_wakeups(&self) {
        self.wakeups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_redundant_wakeups(&self) {
        self.redundant_wakeups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_broadcasts(&self) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_exits(&self) {
        self.exits.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            admissions: self.admissions.load(Ordering::Relaxed),
            blocked_entries: self.blocked_entries.load(Ordering::Relaxed),
            wakeups: self.wakeups.load(Ordering::Relaxed),
            redundant_wakeups: self.redundant_wakeups.load(Ordering::Relaxed),
            broadcasts: self.broadcasts.load(Ordering::Relaxed),
            exits: self.exits.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub admissions: u64,
    pub blocked_entries: u64,
    pub wakeups: u64,
    pub redundant_wakeups: u64,
    pub broadcasts: u64,
    pub exits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let metrics = ControllerMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_increment_counters() {
        let metrics = ControllerMetrics::new();

        metrics.increment_admissions();
        metrics.increment_admissions();
        metrics.increment_blocked_entries();
        metrics.increment_wakeups();
        metrics.increment_wakeups();
        metrics.increment_wakeups();
        metrics.increment_redundant_wakeups();
        metrics.increment_broadcasts();
        metrics.increment_exits();

        let s = metrics.snapshot();
        assert_eq!(s.admissions, 2);
        assert_eq!(s.blocked_entries, 1);
        assert_eq!(s.wakeups, 3);
        assert_eq!(s.redundant_wakeups, 1);
        assert_eq!(s.broadcasts, 1);
        assert_eq!(s.exits, 1);
    }

    #[test]
    fn test_snapshot_serializes_every_counter() {
        let metrics = ControllerMetrics::new();
        metrics.increment_admissions();
        metrics.increment_broadcasts();

        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["admissions"], 1);
        assert_eq!(json["broadcasts"], 1);
        assert_eq!(json["redundant_wakeups"], 0);
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let metrics = Arc::new(ControllerMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let m = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..100 {
                        m.increment_admissions();
                        m.increment_exits();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let s = metrics.snapshot();
        assert_eq!(s.admissions, 800);
        assert_eq!(s.exits, 800);
    }
}
