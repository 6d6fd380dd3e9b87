//! Error types for setup and snapshot import

use thiserror::Error;

use crate::board::{Coord, GRID_CELLS};

/// Errors raised while configuring a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("unsupported player count {0} (expected 2, 3, 4 or 6)")]
    InvalidPlayerCount(usize),

    #[error("unknown cell code {0}")]
    UnknownCellCode(u8),
}

/// Errors raised while importing a board snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot has {0} cells (expected {expected})", expected = GRID_CELLS)]
    CellCount(usize),

    #[error("cell {pos}: {source}")]
    Cell {
        pos: Coord,
        #[source]
        source: GameError,
    },

    #[error("cell {0} does not match the board outline")]
    Outline(Coord),

    #[error("to-move index {index} out of range for {active} active players")]
    ToMove { index: usize, active: usize },

    #[error(transparent)]
    Game(#[from] GameError),
}
