//! Game engine: roster, turn order, move commit and win detection

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::select;
use crate::board::{Board, Coord};
use crate::config::EngineConfig;
use crate::error::{GameError, SnapshotError};
use crate::events::{BoardListener, GameEvent};
use crate::game::GameState;
use crate::movegen::{legal_destinations, legal_moves, Move};
use crate::pieces::{CellState, Color, PlayerCount};
use crate::snapshot::Snapshot;

// ============================================================================
// PLAYERS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    /// Filled the opposite nest and left the rotation
    Finished,
}

/// A seat at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub color: Color,
    pub human: bool,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(color: Color, human: bool) -> Self {
        Self {
            color,
            human,
            status: PlayerStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Owns the live board. Mutating calls queue `GameEvent`s; collect them with
/// `drain_events` or `dispatch_events` once the call returns.
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    /// Active players in seating order
    roster: Vec<Player>,
    /// Players who have finished, in finishing order
    finished: Vec<Player>,
    /// Index into `roster` of the player to move
    to_move: usize,
    difficulty: u32,
    config: EngineConfig,
    game_over: bool,
    events: Vec<GameEvent>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GameEngine {
    /// Engine with no game in progress
    pub fn new(config: EngineConfig) -> Self {
        Self {
            board: Board::empty(PlayerCount::Two),
            roster: Vec::new(),
            finished: Vec::new(),
            to_move: 0,
            difficulty: config.difficulty,
            config,
            game_over: true,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Reset the board and seat `player_count` players in their nests
    pub fn start_game(&mut self, player_count: usize) -> Result<(), GameError> {
        let players = PlayerCount::try_from(player_count)?;

        self.board = Board::new_game(players);
        self.roster = self.seat_players(players);
        self.finished.clear();
        self.to_move = 0;
        self.difficulty = self.config.difficulty;
        self.game_over = false;

        tracing::info!("New game: {} players", player_count);

        self.events.push(GameEvent::NewGame {
            roster: self.roster.clone(),
        });
        for &color in players.setup() {
            for &pos in self.board.nest(color) {
                self.events.push(GameEvent::PlacePiece { pos, color });
            }
        }

        Ok(())
    }

    /// Search depth for automated moves
    pub fn set_difficulty(&mut self, depth: u32) {
        self.difficulty = depth;
    }

    /// Move the current player's piece from `start` to `end`.
    /// Returns false, leaving the board untouched, when the move is illegal.
    pub fn attempt_move(&mut self, start: Coord, end: Coord) -> bool {
        if self.game_over {
            return false;
        }
        let Some(player) = self.roster.get(self.to_move).copied() else {
            return false;
        };
        if !start.in_bounds() || self.board.cell_at(start) != CellState::Occupied(player.color) {
            return false;
        }
        self.commit(self.to_move, Move::new(start, end))
    }

    /// Search for and commit a move for `color`. Returns the committed move,
    /// or `None` if `color` is not active or has nothing to play (the turn
    /// still passes in that case).
    pub fn auto_move(&mut self, color: Color) -> Option<Move> {
        if self.game_over {
            return None;
        }
        let seat = self
            .roster
            .iter()
            .position(|p| p.color == color && p.is_active())?;
        let rotation: Vec<Color> = self.roster.iter().map(|p| p.color).collect();

        let state = GameState::new(&self.board);
        let next = select(&state, color, &rotation, self.difficulty, true);

        let Some(mv) = state.diff(&next, color) else {
            tracing::warn!("{} has no move, passing", color);
            self.to_move = (seat + 1) % self.roster.len();
            return None;
        };

        if self.commit(seat, mv) {
            Some(mv)
        } else {
            tracing::error!("search chose {} for {}, which the board rejects", mv, color);
            None
        }
    }

    /// Commit a uniformly random legal move for the player to move
    pub fn random_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Move> {
        if self.game_over {
            return None;
        }
        let color = self.current_player()?.color;
        let mv = *legal_moves(&self.board, color).choose(rng)?;
        self.commit(self.to_move, mv).then_some(mv)
    }

    /// Let the player to move act if automated. Human turns return `None`.
    pub fn play_turn(&mut self) -> Option<Move> {
        let player = *self.current_player()?;
        if player.human || self.game_over {
            return None;
        }
        self.auto_move(player.color)
    }

    // ========================================================================
    // COMMIT
    // ========================================================================

    fn commit(&mut self, seat: usize, mv: Move) -> bool {
        let Move { start, end } = mv;

        if !end.in_bounds() || end == start {
            return false;
        }
        if self.board.cell_at(end) != CellState::Empty {
            return false;
        }
        if !legal_destinations(&self.board, start).contains(&end) {
            return false;
        }

        self.board.relocate(start, end);
        tracing::debug!("{} moved {}", self.roster[seat].color, mv);
        self.events.push(GameEvent::MovePiece { start, end });

        self.finish_turn(seat);
        true
    }

    /// Win check for the mover, then hand the turn to the next active seat
    fn finish_turn(&mut self, seat: usize) {
        let color = self.roster[seat].color;

        if self.board.has_won(color) {
            let mut player = self.roster.remove(seat);
            player.status = PlayerStatus::Finished;
            self.finished.push(player);
            self.events.push(GameEvent::PlayerEliminated { player });
            tracing::info!("{} finished in place {}", color, self.finished.len());

            if self.roster.len() <= 1 {
                self.game_over = true;
                tracing::info!("Game over");
            }
            // The next seat slid into the mover's index
            self.to_move = if self.roster.is_empty() { 0 } else { seat % self.roster.len() };
        } else {
            self.to_move = (seat + 1) % self.roster.len();
        }
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    /// Flat encoding of the board plus turn state
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::from_board(&self.board, self.to_move)
    }

    /// Replace the game with a snapshot. Colors that already fill their
    /// target nest are seated as finished.
    pub fn import_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let board = snapshot.to_board()?;
        let seated = self.seat_players(board.players());

        let (roster, finished): (Vec<Player>, Vec<Player>) =
            seated.into_iter().partition(|p| !board.has_won(p.color));
        let finished: Vec<Player> = finished
            .into_iter()
            .map(|p| Player { status: PlayerStatus::Finished, ..p })
            .collect();

        if snapshot.to_move >= roster.len().max(1) {
            return Err(SnapshotError::ToMove {
                index: snapshot.to_move,
                active: roster.len(),
            });
        }

        self.board = board;
        self.game_over = roster.len() <= 1;
        self.roster = roster;
        self.finished = finished;
        self.to_move = snapshot.to_move;

        tracing::info!(
            "Loaded game: {} players, {} active",
            snapshot.player_count,
            self.roster.len()
        );

        self.events.push(GameEvent::NewGame {
            roster: self.roster.clone(),
        });
        for (pos, color) in self.board.pieces() {
            self.events.push(GameEvent::PlacePiece { pos, color });
        }

        Ok(())
    }

    // ========================================================================
    // EVENTS
    // ========================================================================

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver queued events to `listener`
    pub fn dispatch_events<L: BoardListener + ?Sized>(&mut self, listener: &mut L) {
        for event in self.drain_events() {
            event.dispatch(listener);
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, pos: Coord) -> CellState {
        self.board.cell_at(pos)
    }

    /// Destinations for the piece on `start` (for move markers)
    pub fn legal_destinations(&self, start: Coord) -> Vec<Coord> {
        legal_destinations(&self.board, start)
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn finished(&self) -> &[Player] {
        &self.finished
    }

    pub fn current_player(&self) -> Option<&Player> {
        if self.game_over {
            return None;
        }
        self.roster.get(self.to_move)
    }

    pub fn to_move(&self) -> usize {
        self.to_move
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn player_count(&self) -> PlayerCount {
        self.board.players()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn seat_players(&self, players: PlayerCount) -> Vec<Player> {
        players
            .setup()
            .iter()
            .enumerate()
            .map(|(seat, &color)| Player::new(color, self.config.is_human(seat)))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
