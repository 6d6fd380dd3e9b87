//! Show command - print a saved snapshot

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use sternhalma_core::{evaluate, Snapshot};

#[derive(Args)]
pub struct ShowArgs {
    /// Snapshot JSON file
    #[arg(value_name = "FILE")]
    pub snapshot: PathBuf,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let state = snapshot
        .to_game_state()
        .with_context(|| format!("Invalid snapshot: {}", args.snapshot.display()))?;
    let board = state.board();

    println!("{}", board.diagram());
    println!("Players: {}  To move: seat {}", snapshot.player_count, snapshot.to_move);
    for &color in board.players().setup() {
        println!(
            "  {:<8} {:>2}/{} home  eval {}",
            color.name(),
            board.pieces_home(color),
            board.players().nest_size(),
            evaluate(&state, color)
        );
    }

    Ok(())
}
