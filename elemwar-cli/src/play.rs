//! Play command - simulate a single match between two engines

use anyhow::{Context, Result};
use clap::Args;

use elemwar_core::{simulate_game, to_symbols, Engine, Match, ScorePair, Verdict};

#[derive(Args)]
pub struct PlayArgs {
    /// First engine code (12 depth digits or 13 element symbols)
    pub first: String,

    /// Second engine code
    pub second: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let first = Engine::parse(&args.first)
        .with_context(|| format!("Invalid first engine '{}'", args.first))?;
    let second = Engine::parse(&args.second)
        .with_context(|| format!("Invalid second engine '{}'", args.second))?;

    tracing::debug!("Playing {} vs {}", first, second);

    let played = simulate_game(&first, &second)
        .with_context(|| format!("Match {} vs {} is invalid", first, second))?;

    if args.json {
        print_json_results(&first, &second, &played)
    } else {
        print_text_results(&first, &second, &played);
        Ok(())
    }
}

/// Print results as text
fn print_text_results(first: &Engine, second: &Engine, played: &Match) {
    println!("\n=== {} vs {} ===", first, second);
    println!("Round  First  Second  Winner");

    for round in 0..played.verdicts.len() {
        println!(
            "{:>5}  {:>5}  {:>6}  {}",
            round + 1,
            played.moves_first[round],
            played.moves_second[round],
            verdict_label(played.verdicts[round])
        );
    }

    println!(
        "\nFinal score: {} - {} ({})",
        played.score.first,
        played.score.second,
        verdict_label(played.score.verdict())
    );
}

/// Print results as JSON
fn print_json_results(first: &Engine, second: &Engine, played: &Match) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        first: &'a str,
        second: &'a str,
        moves_first: String,
        moves_second: String,
        verdicts: &'a [Verdict],
        score: ScorePair,
        winner: &'static str,
    }

    let output = JsonOutput {
        first: first.code(),
        second: second.code(),
        moves_first: to_symbols(&played.moves_first),
        moves_second: to_symbols(&played.moves_second),
        verdicts: &played.verdicts,
        score: played.score,
        winner: verdict_label(played.score.verdict()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::FirstWins => "first",
        Verdict::SecondWins => "second",
        Verdict::Tie => "tie",
    }
}
