//! Batch evaluation of one candidate against the opponent panel
//!
//! Level 2 - Phase-level implementation

use std::fmt;

use elemwar_core::{simulate_game, Engine, ScorePair, Verdict};
use serde::Serialize;

/// Bonus added on top of the differential for a won match
pub const WIN_BONUS: i64 = 10;

/// Penalty subtracted from the differential for a lost match
pub const LOSS_PENALTY: i64 = 10;

/// Result of evaluating one candidate
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    /// Candidate engine code
    pub engine: String,
    /// Accumulated score across the panel
    pub score: i64,
    /// True when no valid match in the panel was lost
    pub never_loses: bool,
    /// Matches won outright
    pub wins: u32,
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (score: {}, never loses: {}, wins: {})",
            self.engine, self.score, self.never_loses, self.wins
        )
    }
}

/// Evaluate a candidate against every opponent in the panel (Level 2 phase)
///
/// # Arguments
/// * `candidate` - The engine being evaluated
/// * `panel` - Opponent engines
///
/// # Returns
/// Accumulated score, win count and never-loses flag
pub fn evaluate_candidate(candidate: &Engine, panel: &[Engine]) -> EvaluationResult {
    evaluate_tracked(candidate, panel, |_| {})
}

/// Evaluate every candidate sequentially, in input order
pub fn evaluate_all(candidates: &[Engine], panel: &[Engine]) -> Vec<EvaluationResult> {
    candidates
        .iter()
        .map(|candidate| evaluate_candidate(candidate, panel))
        .collect()
}

/// Evaluate a candidate, calling `on_match` after each valid match
pub(crate) fn evaluate_tracked<F>(
    candidate: &Engine,
    panel: &[Engine],
    mut on_match: F,
) -> EvaluationResult
where
    F: FnMut(ScorePair),
{
    let mut tally = Tally::new();

    for opponent in panel {
        match simulate_game(candidate, opponent) {
            Ok(played) => {
                tally.record(played.score);
                on_match(played.score);
            }
            Err(err) => {
                tracing::warn!(
                    candidate = %candidate,
                    opponent = %opponent,
                    "skipping invalid match: {}",
                    err
                );
            }
        }
    }

    tally.finish(candidate)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Running totals for one candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tally {
    score: i64,
    never_loses: bool,
    wins: u32,
}

impl Tally {
    fn new() -> Self {
        Self {
            score: 0,
            never_loses: true,
            wins: 0,
        }
    }

    /// Fold one match result (candidate is the first player)
    fn record(&mut self, result: ScorePair) {
        let diff = result.differential() as i64;
        match result.verdict() {
            Verdict::FirstWins => {
                self.score += diff + WIN_BONUS;
                self.wins += 1;
            }
            Verdict::SecondWins => {
                self.score += diff - LOSS_PENALTY;
                self.never_loses = false;
            }
            // Ties score the candidate's own rounds, not the differential
            Verdict::Tie => self.score += result.first as i64,
        }
    }

    fn finish(self, candidate: &Engine) -> EvaluationResult {
        EvaluationResult {
            engine: candidate.code().to_string(),
            score: self.score,
            never_loses: self.never_loses,
            wins: self.wins,
        }
    }
}
