//! Snapshot - flat board encoding for save/load

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{all_coords, is_playable, Board, GRID_CELLS};
use crate::error::SnapshotError;
use crate::game::GameState;
use crate::pieces::{CellState, PlayerCount};

/// Every grid cell (Invalid included) as a cell code in grid order, plus
/// whose turn it is and how many players the game started with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: Vec<u8>,
    pub to_move: usize,
    pub player_count: usize,
}

impl Snapshot {
    /// Encode a board
    pub fn from_board(board: &Board, to_move: usize) -> Self {
        Self {
            cells: board.cells().iter().map(|c| c.code()).collect(),
            to_move,
            player_count: board.players().count(),
        }
    }

    /// Decode the board. The Invalid mask must match the star outline exactly.
    pub fn to_board(&self) -> Result<Board, SnapshotError> {
        let players = PlayerCount::try_from(self.player_count)?;

        if self.cells.len() != GRID_CELLS {
            return Err(SnapshotError::CellCount(self.cells.len()));
        }

        let mut cells = [CellState::Invalid; GRID_CELLS];
        for ((slot, &code), pos) in cells.iter_mut().zip(&self.cells).zip(all_coords()) {
            let state = CellState::from_code(code)
                .map_err(|source| SnapshotError::Cell { pos, source })?;
            if (state == CellState::Invalid) == is_playable(pos) {
                return Err(SnapshotError::Outline(pos));
            }
            *slot = state;
        }

        Ok(Board::from_cells(cells, players))
    }

    /// Decode as a search node
    pub fn to_game_state(&self) -> Result<GameState, SnapshotError> {
        self.to_board().map(GameState::from)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
        Ok(snapshot)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::error::GameError;
    use crate::pieces::Color;

    #[test]
    fn test_encodes_every_cell() {
        let board = Board::new_game(PlayerCount::Four);
        let snapshot = Snapshot::from_board(&board, 2);
        assert_eq!(snapshot.cells.len(), GRID_CELLS);
        assert_eq!(snapshot.player_count, 4);
        assert_eq!(snapshot.to_move, 2);
        // (-8, -8) is the first cell and lies off the star
        assert_eq!(snapshot.cells[0], 7);
        assert_eq!(snapshot.to_board().unwrap(), board);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let mut snapshot = Snapshot::from_board(&Board::new_game(PlayerCount::Two), 0);
        snapshot.cells.pop();
        assert_eq!(snapshot.to_board(), Err(SnapshotError::CellCount(GRID_CELLS - 1)));
    }

    #[test]
    fn test_rejects_bad_code() {
        let mut snapshot = Snapshot::from_board(&Board::new_game(PlayerCount::Two), 0);
        snapshot.cells[0] = 9;
        assert!(matches!(
            snapshot.to_board(),
            Err(SnapshotError::Cell { source: GameError::UnknownCellCode(9), .. })
        ));
    }

    #[test]
    fn test_rejects_outline_mismatch() {
        let mut snapshot = Snapshot::from_board(&Board::new_game(PlayerCount::Two), 0);
        // Put a piece on the off-star corner
        snapshot.cells[0] = Color::Red as u8;
        assert_eq!(snapshot.to_board(), Err(SnapshotError::Outline(Coord::new(-8, -8))));
    }

    #[test]
    fn test_rejects_player_count() {
        let mut snapshot = Snapshot::from_board(&Board::new_game(PlayerCount::Two), 0);
        snapshot.player_count = 5;
        assert_eq!(
            snapshot.to_board(),
            Err(SnapshotError::Game(GameError::InvalidPlayerCount(5)))
        );
    }

    #[test]
    fn test_game_state_matches_board() {
        let board = Board::new_game(PlayerCount::Three);
        let state = Snapshot::from_board(&board, 1).to_game_state().unwrap();
        assert_eq!(state.board(), &board);

        let mut snapshot = Snapshot::from_board(&board, 1);
        snapshot.cells.clear();
        assert_eq!(snapshot.to_game_state(), Err(SnapshotError::CellCount(0)));
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = Snapshot::from_board(&Board::new_game(PlayerCount::Six), 5);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
