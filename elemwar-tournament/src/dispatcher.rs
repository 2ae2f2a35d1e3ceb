//! Concurrent dispatch - fans candidates out over a fixed worker pool
//!
//! Level 1 - Orchestration and Level 3 - Steps

use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use elemwar_core::Engine;
use rayon::prelude::*;

use crate::config::EvalConfig;
use crate::evaluator::{evaluate_tracked, EvaluationResult};
use crate::progress::{ProgressCounter, ProgressObserver, ProgressSnapshot};

/// Error types for a dispatched evaluation
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Outcome of a full evaluation run
#[derive(Clone, Debug)]
pub struct EvaluationRun {
    /// One result per candidate, in candidate order
    pub results: Vec<EvaluationResult>,
    /// Valid matches actually played
    pub completed: u64,
    /// Pairwise comparisons requested (candidates x opponents)
    pub total_comparisons: u64,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Evaluate all candidates against the panel on `config.workers` workers
///
/// # Arguments
/// * `candidates` - Engines to rank
/// * `panel` - Opponent engines, shared read-only by all workers
/// * `config` - Worker count and progress cadence
/// * `observer` - Called from worker threads on each progress report
///
/// # Returns
/// Every candidate's result once all workers have finished
pub fn run_evaluation<F>(
    candidates: &[Engine],
    panel: &[Engine],
    config: &EvalConfig,
    observer: F,
) -> Result<EvaluationRun, TournamentError>
where
    F: Fn(ProgressSnapshot) + Sync,
{
    run_observed(candidates, panel, config, &observer)
}

/// Same as [`run_evaluation`], with an observer that also sees every match
pub fn run_observed<O>(
    candidates: &[Engine],
    panel: &[Engine],
    config: &EvalConfig,
    observer: &O,
) -> Result<EvaluationRun, TournamentError>
where
    O: ProgressObserver,
{
    if config.workers == 0 {
        return Err(TournamentError::NoWorkers);
    }

    let started = Instant::now();
    let total_comparisons = candidates.len() as u64 * panel.len() as u64;
    let progress = ProgressCounter::new(total_comparisons, config.report_interval);
    let partitions = partition(candidates, config.workers);

    tracing::info!(
        "Evaluating {} candidates against {} opponents on {} workers",
        candidates.len(),
        panel.len(),
        config.workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()?;
    let (sender, receiver) = crossbeam_channel::unbounded();

    let mut indexed: Vec<(usize, EvaluationResult)> = std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                partitions
                    .into_par_iter()
                    .enumerate()
                    .for_each_with(sender, |sender, (worker, partition)| {
                        evaluate_partition(worker, partition, panel, &progress, observer, sender)
                    })
            })
        });

        // Ends once every worker has dropped its sender
        receiver.iter().collect()
    });

    indexed.sort_unstable_by_key(|(index, _)| *index);
    let results = indexed.into_iter().map(|(_, result)| result).collect();

    let run = EvaluationRun {
        results,
        completed: progress.completed(),
        total_comparisons,
        elapsed: started.elapsed(),
    };

    tracing::info!(
        "Evaluation finished: {} matches in {:.2}s",
        run.completed,
        run.elapsed.as_secs_f64()
    );

    Ok(run)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Contiguous slice of candidates owned by one worker
#[derive(Clone, Copy, Debug)]
struct Partition<'a> {
    /// Index of the first candidate in the full list
    offset: usize,
    candidates: &'a [Engine],
}

/// Split candidates into exactly `workers` contiguous, near-equal slices.
/// Trailing slices may be empty.
fn partition(candidates: &[Engine], workers: usize) -> Vec<Partition<'_>> {
    let n = candidates.len();
    let chunk = n.div_ceil(workers);

    (0..workers)
        .map(|i| {
            let start = (i * chunk).min(n);
            let end = (start + chunk).min(n);
            Partition {
                offset: start,
                candidates: &candidates[start..end],
            }
        })
        .collect()
}

/// Run the batch evaluator over one partition, sending each result
fn evaluate_partition<O>(
    worker: usize,
    partition: Partition<'_>,
    panel: &[Engine],
    progress: &ProgressCounter,
    observer: &O,
    sender: &mut Sender<(usize, EvaluationResult)>,
) where
    O: ProgressObserver,
{
    if partition.candidates.is_empty() {
        return;
    }

    tracing::debug!(worker, candidates = partition.candidates.len(), "worker started");

    for (i, candidate) in partition.candidates.iter().enumerate() {
        let result = evaluate_tracked(candidate, panel, |_| {
            observer.on_match();
            if let Some(snapshot) = progress.record() {
                observer.on_report(snapshot);
            }
        });

        if sender.send((partition.offset + i, result)).is_err() {
            tracing::warn!(worker, "result channel closed, stopping worker");
            return;
        }
    }

    tracing::debug!(worker, "worker finished");
}
