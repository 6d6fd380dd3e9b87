//! Notifications emitted by the engine

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::engine::Player;
use crate::pieces::Color;

/// Something observable that happened to the game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame { roster: Vec<Player> },
    PlacePiece { pos: Coord, color: Color },
    MovePiece { start: Coord, end: Coord },
    PlayerEliminated { player: Player },
}

impl GameEvent {
    /// Forward to the matching listener method
    pub fn dispatch<L: BoardListener + ?Sized>(&self, listener: &mut L) {
        match self {
            GameEvent::NewGame { roster } => listener.on_new_game(roster),
            GameEvent::PlacePiece { pos, color } => listener.on_place_piece(*pos, *color),
            GameEvent::MovePiece { start, end } => listener.on_move_piece(*start, *end),
            GameEvent::PlayerEliminated { player } => listener.on_player_eliminated(player),
        }
    }
}

/// Receiver for engine notifications (a view, a logger, a recorder).
/// Every method defaults to doing nothing.
pub trait BoardListener {
    fn on_new_game(&mut self, _roster: &[Player]) {}
    fn on_place_piece(&mut self, _pos: Coord, _color: Color) {}
    fn on_move_piece(&mut self, _start: Coord, _end: Coord) {}
    fn on_player_eliminated(&mut self, _player: &Player) {}
}
