//! Piece colors, nests and per-player-count setups

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::error::GameError;

/// Piece color (one per player)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red = 0,
    Yellow = 1,
    Green = 2,
    Cyan = 3,
    Blue = 4,
    Magenta = 5,
}

/// All colors in palette order
pub const COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

impl Color {
    /// The color whose nest lies across the board center.
    /// Filling the opposite nest is this color's win condition.
    pub const fn opposite(self) -> Color {
        match self {
            Color::Red => Color::Cyan,
            Color::Yellow => Color::Blue,
            Color::Green => Color::Magenta,
            Color::Cyan => Color::Red,
            Color::Blue => Color::Yellow,
            Color::Magenta => Color::Green,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Color> {
        COLORS.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Cyan => "Cyan",
            Color::Blue => "Blue",
            Color::Magenta => "Magenta",
        }
    }

    /// Single-letter tag for board diagrams
    pub const fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Cyan => 'C',
            Color::Blue => 'B',
            Color::Magenta => 'M',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// State of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Invalid,
    Occupied(Color),
}

impl CellState {
    /// Snapshot code: colors 0-5, Empty 6, Invalid 7
    pub const fn code(self) -> u8 {
        match self {
            CellState::Occupied(color) => color as u8,
            CellState::Empty => 6,
            CellState::Invalid => 7,
        }
    }

    pub fn from_code(code: u8) -> Result<CellState, GameError> {
        match code {
            6 => Ok(CellState::Empty),
            7 => Ok(CellState::Invalid),
            c => Color::from_index(c as usize)
                .map(CellState::Occupied)
                .ok_or(GameError::UnknownCellCode(code)),
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            CellState::Occupied(color) => Some(color),
            _ => None,
        }
    }

    /// Anything that can be jumped over
    pub fn is_occupied(self) -> bool {
        matches!(self, CellState::Occupied(_))
    }
}

/// Supported player counts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCount {
    Two,
    Three,
    Four,
    Six,
}

impl PlayerCount {
    pub fn count(self) -> usize {
        match self {
            PlayerCount::Two => 2,
            PlayerCount::Three => 3,
            PlayerCount::Four => 4,
            PlayerCount::Six => 6,
        }
    }

    /// Pieces per player, which is also the nest size
    pub fn nest_size(self) -> usize {
        match self {
            PlayerCount::Two => 15,
            _ => 10,
        }
    }

    /// Colors in play, in seating order
    pub fn setup(self) -> &'static [Color] {
        match self {
            PlayerCount::Two => &[Color::Red, Color::Cyan],
            PlayerCount::Three => &[Color::Red, Color::Green, Color::Blue],
            PlayerCount::Four => &[Color::Red, Color::Green, Color::Cyan, Color::Magenta],
            PlayerCount::Six => &COLORS,
        }
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = GameError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            2 => Ok(PlayerCount::Two),
            3 => Ok(PlayerCount::Three),
            4 => Ok(PlayerCount::Four),
            6 => Ok(PlayerCount::Six),
            n => Err(GameError::InvalidPlayerCount(n)),
        }
    }
}

// ============================================================================
// NEST TABLES
// ============================================================================

const fn c(x: i8, y: i8) -> Coord {
    Coord::new(x, y)
}

/// Full nest tables in palette order. The first ten entries of each are the
/// star point (tip first); the last five are the adjacent hexagon edge row.
const NEST_TABLE: [[Coord; 15]; 6] = [
    // Red
    [
        c(-4, 8), c(-4, 7), c(-3, 7), c(-4, 6), c(-3, 6),
        c(-2, 6), c(-4, 5), c(-3, 5), c(-2, 5), c(-1, 5),
        c(-4, 4), c(-3, 4), c(-2, 4), c(-1, 4), c(0, 4),
    ],
    // Yellow
    [
        c(4, 4), c(3, 4), c(4, 3), c(2, 4), c(3, 3),
        c(4, 2), c(1, 4), c(2, 3), c(3, 2), c(4, 1),
        c(0, 4), c(1, 3), c(2, 2), c(3, 1), c(4, 0),
    ],
    // Green
    [
        c(8, -4), c(7, -3), c(7, -4), c(6, -2), c(6, -3),
        c(6, -4), c(5, -1), c(5, -2), c(5, -3), c(5, -4),
        c(4, 0), c(4, -1), c(4, -2), c(4, -3), c(4, -4),
    ],
    // Cyan
    [
        c(4, -8), c(4, -7), c(3, -7), c(4, -6), c(3, -6),
        c(2, -6), c(4, -5), c(3, -5), c(2, -5), c(1, -5),
        c(4, -4), c(3, -4), c(2, -4), c(1, -4), c(0, -4),
    ],
    // Blue
    [
        c(-4, -4), c(-3, -4), c(-4, -3), c(-2, -4), c(-3, -3),
        c(-4, -2), c(-1, -4), c(-2, -3), c(-3, -2), c(-4, -1),
        c(0, -4), c(-1, -3), c(-2, -2), c(-3, -1), c(-4, 0),
    ],
    // Magenta
    [
        c(-8, 4), c(-7, 3), c(-7, 4), c(-6, 2), c(-6, 3),
        c(-6, 4), c(-5, 1), c(-5, 2), c(-5, 3), c(-5, 4),
        c(-4, 0), c(-4, 1), c(-4, 2), c(-4, 3), c(-4, 4),
    ],
];

/// Number of cells in a star point
pub const POINT_SIZE: usize = 10;

/// Ordered nest of `color` for the given player count
pub fn nest(color: Color, players: PlayerCount) -> &'static [Coord] {
    &NEST_TABLE[color.index()][..players.nest_size()]
}

/// The star point of `color` (never part of the central hexagon)
pub fn star_point(color: Color) -> &'static [Coord] {
    &NEST_TABLE[color.index()][..POINT_SIZE]
}

/// Cells `color` must fill to win
pub fn target_nest(color: Color, players: PlayerCount) -> &'static [Coord] {
    nest(color.opposite(), players)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involutive() {
        for color in COLORS {
            assert_ne!(color.opposite(), color);
            assert_eq!(color.opposite().opposite(), color);
        }
    }

    #[test]
    fn test_nest_sizes() {
        assert_eq!(nest(Color::Red, PlayerCount::Two).len(), 15);
        assert_eq!(nest(Color::Red, PlayerCount::Three).len(), 10);
        assert_eq!(nest(Color::Green, PlayerCount::Six).len(), 10);
        assert_eq!(nest(Color::Red, PlayerCount::Two)[0], Coord::new(-4, 8));
    }

    #[test]
    fn test_setups_match_counts() {
        for n in [2usize, 3, 4, 6] {
            let players = PlayerCount::try_from(n).unwrap();
            assert_eq!(players.setup().len(), n);
            assert_eq!(players.count(), n);
        }
        assert!(PlayerCount::try_from(5).is_err());
        assert!(PlayerCount::try_from(1).is_err());
    }

    #[test]
    fn test_cell_codes() {
        for code in 0u8..8 {
            assert_eq!(CellState::from_code(code).unwrap().code(), code);
        }
        assert!(CellState::from_code(8).is_err());
    }

    #[test]
    fn test_star_points_disjoint() {
        let mut all: Vec<Coord> = COLORS
            .iter()
            .flat_map(|&c| star_point(c).iter().copied())
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 60);
    }
}
