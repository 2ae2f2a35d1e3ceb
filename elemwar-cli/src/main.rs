//! ELEMWAR CLI - Command-line interface
//!
//! Commands:
//! - evaluate: Rank candidate engines against an opponent panel
//! - play: Simulate a single match

mod evaluate;
mod play;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "elemwar")]
#[command(about = "ELEMWAR engine evaluator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate engines against an opponent panel
    Evaluate(evaluate::EvaluateArgs),
    /// Simulate a single match and show every round
    Play(play::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate(args) => evaluate::run(args),
        Commands::Play(args) => play::run(args),
    }
}

/// Log to stderr, filtered by RUST_LOG (default: info)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
