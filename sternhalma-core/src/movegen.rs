//! Move generation: single steps and chained jumps

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, DIRECTIONS};
use crate::pieces::{CellState, Color};

/// A complete relocation. A chain of jumps collapses into its final landing cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub start: Coord,
    pub end: Coord,
}

impl Move {
    pub const fn new(start: Coord, end: Coord) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Accumulates destinations in discovery order, deduplicated by coordinate
struct Destinations<'a> {
    board: &'a Board,
    found: Vec<Coord>,
    seen: FxHashSet<Coord>,
}

impl<'a> Destinations<'a> {
    fn add(&mut self, pos: Coord) -> bool {
        if self.seen.insert(pos) {
            self.found.push(pos);
            true
        } else {
            false
        }
    }

    /// Try a single jump from `from` over its neighbor in `dir`
    fn jump(&mut self, from: Coord, dir: (i8, i8)) {
        let landing = from.offset(dir, 2);
        if !landing.in_bounds() || self.seen.contains(&landing) {
            return;
        }
        if self.board.cell_at(landing) == CellState::Empty {
            self.add(landing);
            self.chain(landing);
        }
    }

    /// Continue a jump chain from a landing cell in every direction
    fn chain(&mut self, landing: Coord) {
        for dir in DIRECTIONS {
            let over = landing.offset(dir, 1);
            if over.in_bounds() && self.board.cell_at(over).is_occupied() {
                self.jump(landing, dir);
            }
        }
    }
}

/// All cells the piece on `start` can reach in one move.
///
/// Order is deterministic: directions in `DIRECTIONS` order, with each jump
/// chain explored depth-first as it is found. Ownership of the piece on
/// `start` is not checked; only board occupancy matters.
pub fn legal_destinations(board: &Board, start: Coord) -> Vec<Coord> {
    let mut dest = Destinations {
        board,
        found: Vec::new(),
        seen: FxHashSet::default(),
    };

    for dir in DIRECTIONS {
        let adjacent = start.offset(dir, 1);
        if !adjacent.in_bounds() {
            continue;
        }
        match board.cell_at(adjacent) {
            CellState::Empty => {
                dest.add(adjacent);
            }
            CellState::Occupied(_) => dest.jump(start, dir),
            CellState::Invalid => {}
        }
    }

    dest.found
}

/// Every move available to `color`, pieces in grid order
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .positions_of(color)
        .into_iter()
        .flat_map(|start| {
            legal_destinations(board, start)
                .into_iter()
                .map(move |end| Move::new(start, end))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::all_coords;
    use crate::pieces::PlayerCount;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn board_with(pieces: &[(i8, i8)]) -> Board {
        let mut board = Board::empty(PlayerCount::Two);
        for &(x, y) in pieces {
            board.set_cell(Coord::new(x, y), CellState::Occupied(Color::Red));
        }
        board
    }

    fn random_board(seed: u64, density: f64) -> Board {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::empty(PlayerCount::Six);
        for pos in all_coords() {
            if board.cell_at(pos) == CellState::Empty && rng.gen_bool(density) {
                let color = Color::from_index(rng.gen_range(0..6)).unwrap();
                board.set_cell(pos, CellState::Occupied(color));
            }
        }
        board
    }

    #[test]
    fn test_lone_piece_steps_only() {
        let board = board_with(&[(0, 0)]);
        let dests = legal_destinations(&board, Coord::new(0, 0));
        let expected: Vec<Coord> = (0..6).map(|d| Coord::new(0, 0).neighbor(d)).collect();
        assert_eq!(dests, expected);
    }

    #[test]
    fn test_single_jump() {
        let board = board_with(&[(0, 0), (0, 1)]);
        let dests = legal_destinations(&board, Coord::new(0, 0));
        assert!(dests.contains(&Coord::new(0, 2)));
        assert!(!dests.contains(&Coord::new(0, 1)));
        assert_eq!(dests.len(), 6);
    }

    #[test]
    fn test_chain_changes_direction() {
        // Jump +y over (0,1) to (0,2), then +x over (1,2) to (2,2)
        let board = board_with(&[(0, 0), (0, 1), (1, 2)]);
        let dests = legal_destinations(&board, Coord::new(0, 0));
        assert!(dests.contains(&Coord::new(0, 2)));
        assert!(dests.contains(&Coord::new(2, 2)));
        let first = dests.iter().position(|&p| p == Coord::new(0, 2)).unwrap();
        let second = dests.iter().position(|&p| p == Coord::new(2, 2)).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_steps_do_not_chain() {
        // (0,1) is empty; (0,2) occupied would only be reachable by a jump from (0,1)
        let board = board_with(&[(0, 0), (0, 2)]);
        let dests = legal_destinations(&board, Coord::new(0, 0));
        assert!(dests.contains(&Coord::new(0, 1)));
        assert!(!dests.contains(&Coord::new(0, 3)));
    }

    #[test]
    fn test_jump_blocked_by_edge_and_invalid() {
        // Red tip: +y leaves the box, -y jumps over (-4,7)
        let board = board_with(&[(-4, 8), (-4, 7)]);
        let dests = legal_destinations(&board, Coord::new(-4, 8));
        assert_eq!(dests, vec![Coord::new(-3, 7), Coord::new(-4, 6)]);

        // Landing cell (-1,6) is off the star
        let board = board_with(&[(-3, 6), (-2, 6)]);
        let dests = legal_destinations(&board, Coord::new(-3, 6));
        assert!(!dests.contains(&Coord::new(-1, 6)));
        assert!(dests.iter().all(|&p| board.cell_at(p) == CellState::Empty));
    }

    #[test]
    fn test_cyclic_jump_geometry_terminates() {
        // Ring of pieces around the center: landings chain back into each other
        let ring = [(0, 1), (1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1)];
        let mut pieces: Vec<(i8, i8)> = ring.to_vec();
        pieces.push((2, -2));
        pieces.push((-2, 2));
        pieces.push((3, -1));
        let board = board_with(&pieces);
        let start = Coord::new(0, 1);
        let dests = legal_destinations(&board, start);
        let mut sorted = dests.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), dests.len());
        assert!(!dests.contains(&start));
    }

    #[test]
    fn test_step_and_jump_disjoint() {
        // Jump landings keep the parity of both coordinates, so a chain can
        // never end on a cell adjacent to the start.
        for seed in 100..110u64 {
            let board = random_board(seed, 0.5);
            for (start, _) in board.pieces() {
                let steps: Vec<Coord> = (0..6)
                    .map(|d| start.neighbor(d))
                    .filter(|&p| board.cell_at(p) == CellState::Empty)
                    .collect();
                for pos in legal_destinations(&board, start) {
                    if steps.contains(&pos) {
                        continue;
                    }
                    assert_eq!((pos.x - start.x).rem_euclid(2), 0);
                    assert_eq!((pos.y - start.y).rem_euclid(2), 0);
                }
            }
        }
    }

    #[test]
    fn test_random_boards_bounds_and_uniqueness() {
        for seed in 0..20u64 {
            let board = random_board(seed, 0.45);
            for (start, _) in board.pieces() {
                let dests = legal_destinations(&board, start);
                let unique: FxHashSet<Coord> = dests.iter().copied().collect();
                assert_eq!(unique.len(), dests.len(), "duplicates from {start}");
                for pos in dests {
                    assert!(pos.in_bounds());
                    assert_eq!(board.cell_at(pos), CellState::Empty);
                }
            }
        }
    }

    #[test]
    fn test_packed_start_front_row_jumps() {
        // The back rows can already jump over the hexagon edge row
        let board = Board::new_game(PlayerCount::Two);
        let moves = legal_moves(&board, Color::Red);
        assert!(moves.contains(&Move::new(Coord::new(-1, 5), Coord::new(-1, 3))));
        assert!(moves.contains(&Move::new(Coord::new(0, 4), Coord::new(0, 3))));
        for mv in &moves {
            assert_eq!(board.cell_at(mv.end), CellState::Empty);
        }
    }

    #[test]
    fn test_destinations_are_deterministic() {
        let board = random_board(7, 0.5);
        for (start, _) in board.pieces() {
            assert_eq!(legal_destinations(&board, start), legal_destinations(&board, start));
        }
    }
}
