//! Search-tree node: an owned copy of the board

use crate::board::{Board, Coord};
use crate::movegen::{legal_destinations, Move};
use crate::pieces::{CellState, Color};

/// Game state (clone to mutate). Never aliases the live board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
}

impl GameState {
    /// Deep copy of `board`
    pub fn new(board: &Board) -> Self {
        Self {
            board: board.clone(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, pos: Coord) -> CellState {
        self.board.cell_at(pos)
    }

    /// Every state reachable by one move of `color`: one child per
    /// (piece, destination) pair, pieces in grid order.
    pub fn expand(&self, color: Color) -> Vec<GameState> {
        let mut children = Vec::new();

        for start in self.board.positions_of(color) {
            for end in legal_destinations(&self.board, start) {
                let mut child = self.clone();
                child.board.set_cell(start, CellState::Empty);
                child.board.set_cell(end, CellState::Occupied(color));
                children.push(child);
            }
        }

        children
    }

    /// Recover the single relocation of `color` that turns `self` into `next`.
    /// `None` when `color` did not move.
    pub fn diff(&self, next: &GameState, color: Color) -> Option<Move> {
        let mine = CellState::Occupied(color);
        let mut start = None;
        let mut end = None;

        for ((pos, before), after) in crate::board::all_coords()
            .zip(self.board.cells())
            .zip(next.board.cells())
        {
            if *before == mine && *after != mine {
                start = Some(pos);
            }
            if *before != mine && *after == mine {
                end = Some(pos);
            }
        }

        Some(Move::new(start?, end?))
    }
}

impl From<Board> for GameState {
    fn from(board: Board) -> Self {
        Self { board }
    }
}
