//! ELEMWAR Tournament - Ranking candidate engines against an opponent panel
//!
//! This crate provides the evaluation infrastructure:
//! - Batch evaluation of one candidate against the panel
//! - Concurrent dispatch over a fixed worker pool
//! - Progress tracking and ranking of the results
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_evaluation (orchestration)
//! - Level 2: evaluate_candidate (phase)
//! - Level 3: partitioning, per-match tally (steps)
//! - Level 4: configuration, progress counter, ranking

mod config;
mod dispatcher;
mod evaluator;
mod progress;
mod ranking;

pub use config::{EvalConfig, DEFAULT_REPORT_INTERVAL, DEFAULT_WORKERS};
pub use dispatcher::{run_evaluation, run_observed, EvaluationRun, TournamentError};
pub use evaluator::{evaluate_all, evaluate_candidate, EvaluationResult, LOSS_PENALTY, WIN_BONUS};
pub use progress::{ProgressCounter, ProgressObserver, ProgressSnapshot};
pub use ranking::{rank, write_ranking, RankingFilter};
