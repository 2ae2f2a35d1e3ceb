//! Ranking - filtering, ordering and writing evaluation results

use std::io::{self, Write};

use crate::evaluator::EvaluationResult;

/// Which results make it into the ranking
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RankingFilter {
    /// Keep everything
    #[default]
    All,
    /// Only candidates that never lost a match
    NeverLoses,
    /// Never lost, and won at least this many matches
    NeverLosesWithMinWins(u32),
}

impl RankingFilter {
    pub fn accepts(&self, result: &EvaluationResult) -> bool {
        match *self {
            RankingFilter::All => true,
            RankingFilter::NeverLoses => result.never_loses,
            RankingFilter::NeverLosesWithMinWins(min_wins) => {
                result.never_loses && result.wins >= min_wins
            }
        }
    }
}

/// Filter, then order by score descending. Equal scores keep their input order.
pub fn rank(results: Vec<EvaluationResult>, filter: RankingFilter) -> Vec<EvaluationResult> {
    let mut ranked: Vec<EvaluationResult> = results
        .into_iter()
        .filter(|r| filter.accepts(r))
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Write one human-readable record per line
pub fn write_ranking<W: Write>(out: &mut W, ranked: &[EvaluationResult]) -> io::Result<()> {
    for result in ranked {
        writeln!(out, "{}", result)?;
    }
    out.flush()
}
