//! Sternhalma Core - Rules engine and AI
//!
//! This crate provides the core game logic for star-board peg races
//! (2, 3, 4 or 6 players):
//! - Board geometry (hex grid with axial coordinates)
//! - Colors, nests and per-player-count setups
//! - Move generation with chained jumps
//! - Search-tree snapshots and position evaluation
//! - Turn-rotating minimax AI
//! - Game engine with turn order, win detection and events

pub mod board;
pub mod pieces;
pub mod movegen;
pub mod game;
pub mod eval;
pub mod ai;
pub mod engine;
pub mod events;
pub mod snapshot;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Coord, DIRECTIONS, MIN_COORD, MAX_COORD};
pub use pieces::{CellState, Color, PlayerCount, COLORS, nest, target_nest};
pub use movegen::{legal_destinations, legal_moves, Move};
pub use game::GameState;
pub use eval::evaluate;
pub use ai::{select, MinimaxAI, SearchStats};
pub use engine::{GameEngine, Player, PlayerStatus};
pub use events::{BoardListener, GameEvent};
pub use snapshot::Snapshot;
pub use config::EngineConfig;
pub use error::{GameError, SnapshotError};
