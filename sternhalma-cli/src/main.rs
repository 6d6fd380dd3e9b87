//! Sternhalma CLI - Command-line driver for the game core
//!
//! Commands:
//! - play: Run automated games between search players
//! - show: Print a saved snapshot as a board diagram

mod match_cmd;
mod show_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sternhalma")]
#[command(about = "Star-board peg race engine")]
struct Cli {
    /// Random seed for reproducible openings
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play automated games
    Play(match_cmd::MatchArgs),
    /// Print a saved snapshot
    Show(show_cmd::ShowArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => match_cmd::run(args, cli.seed),
        Commands::Show(args) => show_cmd::run(args),
    }
}
