//! Configuration types for panel evaluation
//!
//! Level 4 - Utilities and configuration

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 16;

/// Default progress cadence, in completed matches
pub const DEFAULT_REPORT_INTERVAL: u64 = 10_000_000;

/// Configuration for evaluating candidates against a panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Number of workers the candidate list is partitioned across
    pub workers: usize,
    /// Report progress every this many completed matches (0 disables)
    pub report_interval: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

impl EvalConfig {
    /// Create config with the given worker count
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    /// Set worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set progress cadence
    pub fn with_report_interval(mut self, report_interval: u64) -> Self {
        self.report_interval = report_interval;
        self
    }
}
