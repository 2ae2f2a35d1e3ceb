//! Evaluate command - rank candidate engines against an opponent panel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_engines(), evaluate(), save_ranking(), report_results()
//! - Level 3: parse_engine_list(), build_filter()
//! - Level 4: progress observer, formatting utilities

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::ProgressBar;

use elemwar_core::Engine;
use elemwar_tournament::{
    rank, run_observed, write_ranking, EvalConfig, EvaluationResult, EvaluationRun,
    ProgressObserver, ProgressSnapshot, RankingFilter, DEFAULT_REPORT_INTERVAL, DEFAULT_WORKERS,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Which candidates end up in the ranking
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Every candidate
    All,
    /// Candidates that never lose (tie or win every match)
    NeverLoses,
    /// Candidates that never lose and win at least --min-wins matches
    MinWins,
}

#[derive(Args)]
pub struct EvaluateArgs {
    /// Candidate engine codes, one per line
    #[arg(long, value_name = "FILE")]
    pub candidates: PathBuf,

    /// Opponent panel engine codes, one per line
    #[arg(long, value_name = "FILE")]
    pub panel: PathBuf,

    /// Ranking filter
    #[arg(long, value_enum, default_value = "all")]
    pub filter: FilterArg,

    /// Minimum number of wins (with --filter min-wins)
    #[arg(long, default_value = "0")]
    pub min_wins: u32,

    /// Output file for the ranked engines
    #[arg(long, default_value = "sorted_engines.txt")]
    pub output: PathBuf,

    /// Number of concurrent workers
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Log progress every this many matches
    #[arg(long, default_value_t = DEFAULT_REPORT_INTERVAL)]
    pub report_interval: u64,

    /// Print the ranking as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run evaluate command
///
/// This function reads like a table of contents:
/// 1. Load candidates and panel
/// 2. Evaluate every candidate against the panel
/// 3. Rank and save the results
/// 4. Report
pub fn run(args: EvaluateArgs) -> Result<()> {
    let (candidates, panel) = load_engines(&args)?;

    let config = EvalConfig::new(args.workers).with_report_interval(args.report_interval);
    let EvaluationRun {
        results,
        completed,
        total_comparisons,
        elapsed,
    } = evaluate(&candidates, &panel, &config)?;

    let ranked = rank(results, build_filter(&args));
    save_ranking(&ranked, &args.output)?;

    tracing::info!(
        "{} of {} matches valid, {:.2}s",
        completed,
        total_comparisons,
        elapsed.as_secs_f64()
    );

    report_results(&ranked, total_comparisons, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load candidate and panel lists
fn load_engines(args: &EvaluateArgs) -> Result<(Vec<Engine>, Vec<Engine>)> {
    let candidates = load_engine_list(&args.candidates, "candidate")?;
    let panel = load_engine_list(&args.panel, "panel")?;
    Ok((candidates, panel))
}

/// Run the dispatcher with a progress bar
fn evaluate(
    candidates: &[Engine],
    panel: &[Engine],
    config: &EvalConfig,
) -> Result<EvaluationRun> {
    let observer = BarObserver::new(candidates.len() as u64 * panel.len() as u64);

    let run = run_observed(candidates, panel, config, &observer).context("Evaluation failed")?;

    observer.bar.finish_and_clear();
    Ok(run)
}

/// Write the ranking, one record per line
fn save_ranking(ranked: &[EvaluationResult], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_ranking(&mut writer, ranked)
        .with_context(|| format!("Failed to write ranking to {}", path.display()))?;

    tracing::info!("Saved {} ranked engines to {}", ranked.len(), path.display());
    Ok(())
}

/// Print summary or JSON
fn report_results(
    ranked: &[EvaluationResult],
    total_comparisons: u64,
    args: &EvaluateArgs,
) -> Result<()> {
    if args.json {
        print_json_results(ranked, total_comparisons)
    } else {
        println!(
            "Sorted engines saved to '{}' from {} matches.",
            args.output.display(),
            total_comparisons
        );
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Read and parse an engine list file
fn load_engine_list(path: &Path, role: &str) -> Result<Vec<Engine>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", role, path.display()))?;

    let engines = parse_engine_list(&content);
    if engines.is_empty() {
        anyhow::bail!("No valid {} engine codes in {}", role, path.display());
    }

    tracing::info!("Loaded {} {} engines from {}", engines.len(), role, path.display());
    Ok(engines)
}

/// Parse one engine per line. A lone `.` ends the list; bad lines are skipped.
fn parse_engine_list(content: &str) -> Vec<Engine> {
    let mut engines = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line == "." {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match Engine::from_line(line) {
            Ok(engine) => engines.push(engine),
            Err(e) => tracing::warn!("Skipping line {}: {}", index + 1, e),
        }
    }

    engines
}

fn build_filter(args: &EvaluateArgs) -> RankingFilter {
    match args.filter {
        FilterArg::All => RankingFilter::All,
        FilterArg::NeverLoses => RankingFilter::NeverLoses,
        FilterArg::MinWins => RankingFilter::NeverLosesWithMinWins(args.min_wins),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Advances the bar on every match and logs on the reporting cadence
struct BarObserver {
    bar: ProgressBar,
}

impl BarObserver {
    fn new(total: u64) -> Self {
        Self {
            bar: ProgressBar::new(total),
        }
    }
}

impl ProgressObserver for BarObserver {
    fn on_match(&self) {
        self.bar.inc(1);
    }

    fn on_report(&self, snapshot: ProgressSnapshot) {
        tracing::info!(
            "Progress: {} / {} matches ({:.2}%), speed: {:.1}k matches/s",
            snapshot.completed,
            snapshot.total,
            snapshot.percent(),
            snapshot.matches_per_sec() / 1000.0
        );
    }
}

/// Print results as JSON
fn print_json_results(ranked: &[EvaluationResult], total_comparisons: u64) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_comparisons: u64,
        ranked: usize,
        results: &'a [EvaluationResult],
    }

    let output = JsonOutput {
        total_comparisons,
        ranked: ranked.len(),
        results: ranked,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
