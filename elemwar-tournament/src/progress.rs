//! Shared progress counter for concurrent evaluation
//!
//! The count is advisory: it feeds progress reports and nothing else.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Point-in-time view of evaluation progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSnapshot {
    /// Matches completed so far
    pub completed: u64,
    /// Matches expected in total (candidates x opponents)
    pub total: u64,
    /// Time since the counter was created
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    /// Completed share in percent
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    /// Throughput in matches per second
    pub fn matches_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.completed as f64 / secs
        } else {
            0.0
        }
    }
}

/// Receives progress from worker threads
pub trait ProgressObserver: Sync {
    /// Called after every completed match
    fn on_match(&self) {}

    /// Called when a match lands on the reporting cadence
    fn on_report(&self, snapshot: ProgressSnapshot);
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressSnapshot) + Sync,
{
    fn on_report(&self, snapshot: ProgressSnapshot) {
        self(snapshot)
    }
}

/// Lock-free count of completed matches across all workers
#[derive(Debug)]
pub struct ProgressCounter {
    completed: AtomicU64,
    total: u64,
    interval: u64,
    started: Instant,
}

impl ProgressCounter {
    /// Counter expecting `total` matches, reporting every `interval` (0 = never)
    pub fn new(total: u64, interval: u64) -> Self {
        Self {
            completed: AtomicU64::new(0),
            total,
            interval,
            started: Instant::now(),
        }
    }

    /// Count one completed match. Returns a snapshot when this match
    /// lands on the reporting cadence.
    pub fn record(&self) -> Option<ProgressSnapshot> {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.interval > 0 && completed % self.interval == 0 {
            Some(self.snapshot_at(completed))
        } else {
            None
        }
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    fn snapshot_at(&self, completed: u64) -> ProgressSnapshot {
        ProgressSnapshot {
            completed,
            total: self.total,
            elapsed: self.started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_reports_on_cadence() {
        let counter = ProgressCounter::new(10, 3);
        let reports: Vec<u64> = (0..10)
            .filter_map(|_| counter.record())
            .map(|s| s.completed)
            .collect();
        assert_eq!(reports, vec![3, 6, 9]);
        assert_eq!(counter.completed(), 10);
    }

    #[test]
    fn test_zero_interval_never_reports() {
        let counter = ProgressCounter::new(5, 0);
        assert!((0..5).all(|_| counter.record().is_none()));
        assert_eq!(counter.completed(), 5);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counter = ProgressCounter::new(8_000, 1_000);
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..1_000 {
                        counter.record();
                    }
                });
            }
        });
        assert_eq!(counter.completed(), 8_000);
    }

    #[test]
    fn test_snapshot_percent() {
        let snapshot = ProgressSnapshot {
            completed: 25,
            total: 200,
            elapsed: Duration::from_secs(5),
        };
        assert_eq!(snapshot.percent(), 12.5);
        assert_eq!(snapshot.matches_per_sec(), 5.0);

        let empty = ProgressSnapshot {
            completed: 0,
            total: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(empty.percent(), 0.0);
        assert_eq!(empty.matches_per_sec(), 0.0);
    }
}
