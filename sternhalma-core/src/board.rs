//! Hex board geometry with axial coordinates and the dense cell grid

use serde::{Deserialize, Serialize};

use crate::pieces::{star_point, CellState, Color, PlayerCount, COLORS};

/// Smallest coordinate on either axis
pub const MIN_COORD: i8 = -8;
/// Largest coordinate on either axis
pub const MAX_COORD: i8 = 8;
/// Cells along one side of the bounding box
pub const SIDE: usize = (MAX_COORD - MIN_COORD + 1) as usize;
/// Cells in the bounding box, playable or not
pub const GRID_CELLS: usize = SIDE * SIDE;
/// Radius of the central hexagon
pub const HEX_RADIUS: i8 = 4;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this coordinate lies inside the bounding box
    pub fn in_bounds(&self) -> bool {
        (MIN_COORD..=MAX_COORD).contains(&self.x) && (MIN_COORD..=MAX_COORD).contains(&self.y)
    }

    /// Inside the central hexagon
    pub fn in_center(&self) -> bool {
        self.x.abs() <= HEX_RADIUS
            && self.y.abs() <= HEX_RADIUS
            && (self.x + self.y).abs() <= HEX_RADIUS
    }

    /// Offset by `steps` times a direction vector
    pub fn offset(&self, (dx, dy): (i8, i8), steps: i8) -> Coord {
        Coord::new(self.x + dx * steps, self.y + dy * steps)
    }

    /// Neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Coord {
        self.offset(DIRECTIONS[direction % 6], 1)
    }

    /// Position in render space, where neighboring cells are one unit apart
    pub fn to_render(&self) -> (f64, f64) {
        let (x, y) = (self.x as f64, self.y as f64);
        (x + RENDER_DX * y, y * RENDER_DY)
    }

    /// Render-space distance rounded to the nearest integer, ties to even
    pub fn render_distance(&self, other: Coord) -> i32 {
        let (ax, ay) = self.to_render();
        let (bx, by) = other.to_render();
        (ax - bx).hypot(ay - by).round_ties_even() as i32
    }

    /// Dense index into the grid, x-major
    fn index(&self) -> usize {
        (self.x - MIN_COORD) as usize * SIDE + (self.y - MIN_COORD) as usize
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const RENDER_DX: f64 = 0.5;
const RENDER_DY: f64 = 0.866_025_4; // sqrt(3) / 2

/// Direction vectors (dx, dy)
/// Index: 0=+y, 1=+x, 2=+x-y, 3=-y, 4=-x, 5=-x+y
pub const DIRECTIONS: [(i8, i8); 6] = [
    (0, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
];

/// Every coordinate of the bounding box in grid order (x outer, y inner)
pub fn all_coords() -> impl Iterator<Item = Coord> {
    (MIN_COORD..=MAX_COORD).flat_map(|x| (MIN_COORD..=MAX_COORD).map(move |y| Coord::new(x, y)))
}

/// Whether a coordinate is a playable cell of the star-shaped board
pub fn is_playable(pos: Coord) -> bool {
    pos.in_bounds()
        && (pos.in_center() || COLORS.iter().any(|&color| star_point(color).contains(&pos)))
}

// ============================================================================
// BOARD
// ============================================================================

/// Dense cell grid over the bounding box plus the active player count.
/// Cells outside the star are `Invalid` and never change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [CellState; GRID_CELLS],
    players: PlayerCount,
}

impl Board {
    /// Empty star-shaped board
    pub fn empty(players: PlayerCount) -> Self {
        let mut cells = [CellState::Invalid; GRID_CELLS];
        for pos in all_coords() {
            if is_playable(pos) {
                cells[pos.index()] = CellState::Empty;
            }
        }
        Self { cells, players }
    }

    /// Board with every active color packed into its own nest
    pub fn new_game(players: PlayerCount) -> Self {
        let mut board = Self::empty(players);
        for &color in players.setup() {
            for &pos in board.nest(color) {
                board.set_cell(pos, CellState::Occupied(color));
            }
        }
        board
    }

    /// Build from cells already in grid order
    pub(crate) fn from_cells(cells: [CellState; GRID_CELLS], players: PlayerCount) -> Self {
        Self { cells, players }
    }

    pub fn players(&self) -> PlayerCount {
        self.players
    }

    /// Cell at `pos`. Callers bounds-check first; out-of-bounds reads as `Invalid`.
    pub fn cell_at(&self, pos: Coord) -> CellState {
        if !pos.in_bounds() {
            return CellState::Invalid;
        }
        self.cells[pos.index()]
    }

    /// Overwrite a playable cell. Writes to `Invalid` cells or outside the box are ignored.
    pub fn set_cell(&mut self, pos: Coord, state: CellState) {
        if !pos.in_bounds() {
            return;
        }
        let cell = &mut self.cells[pos.index()];
        if *cell != CellState::Invalid && state != CellState::Invalid {
            *cell = state;
        }
    }

    /// Relocate whatever sits on `start` to `end`
    pub fn relocate(&mut self, start: Coord, end: Coord) {
        let piece = self.cell_at(start);
        self.set_cell(start, CellState::Empty);
        self.set_cell(end, piece);
    }

    /// Cells in grid order
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Iterate occupied cells in grid order
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Color)> + '_ {
        all_coords().filter_map(|pos| self.cell_at(pos).color().map(|color| (pos, color)))
    }

    /// Positions of `color`'s pieces in grid order
    pub fn positions_of(&self, color: Color) -> Vec<Coord> {
        self.pieces()
            .filter(|&(_, c)| c == color)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn nest(&self, color: Color) -> &'static [Coord] {
        crate::pieces::nest(color, self.players)
    }

    pub fn target_nest(&self, color: Color) -> &'static [Coord] {
        crate::pieces::target_nest(color, self.players)
    }

    /// How many target cells `color` already occupies
    pub fn pieces_home(&self, color: Color) -> usize {
        self.target_nest(color)
            .iter()
            .filter(|&&pos| self.cell_at(pos) == CellState::Occupied(color))
            .count()
    }

    /// `color` fills every cell of its target nest
    pub fn has_won(&self, color: Color) -> bool {
        self.pieces_home(color) == self.players.nest_size()
    }

    /// Text diagram, one row per y (top row first), skewed so hex neighbors line up
    pub fn diagram(&self) -> String {
        let mut out = String::new();
        for y in (MIN_COORD..=MAX_COORD).rev() {
            let indent = (y - MIN_COORD) as usize;
            let mut row = " ".repeat(indent);
            let mut any = false;
            for x in MIN_COORD..=MAX_COORD {
                let ch = match self.cell_at(Coord::new(x, y)) {
                    CellState::Invalid => ' ',
                    CellState::Empty => {
                        any = true;
                        '.'
                    }
                    CellState::Occupied(color) => {
                        any = true;
                        color.symbol()
                    }
                };
                row.push(ch);
                row.push(' ');
            }
            if any {
                out.push_str(row.trim_end());
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Coord::new(0, 0).in_bounds());
        assert!(Coord::new(-8, 8).in_bounds());
        assert!(!Coord::new(9, 0).in_bounds());
        assert!(!Coord::new(0, -9).in_bounds());
    }

    #[test]
    fn test_playable_cell_count() {
        let board = Board::empty(PlayerCount::Six);
        let playable = board.cells().iter().filter(|&&c| c != CellState::Invalid).count();
        assert_eq!(playable, 121);
        assert_eq!(board.cell_at(Coord::new(8, 8)), CellState::Invalid);
        assert_eq!(board.cell_at(Coord::new(0, 0)), CellState::Empty);
    }

    #[test]
    fn test_invalid_cells_never_change() {
        let mut board = Board::empty(PlayerCount::Two);
        board.set_cell(Coord::new(8, 8), CellState::Occupied(Color::Red));
        assert_eq!(board.cell_at(Coord::new(8, 8)), CellState::Invalid);
        board.set_cell(Coord::new(0, 0), CellState::Invalid);
        assert_eq!(board.cell_at(Coord::new(0, 0)), CellState::Empty);
    }

    #[test]
    fn test_new_game_population() {
        let board = Board::new_game(PlayerCount::Two);
        assert_eq!(board.positions_of(Color::Red).len(), 15);
        assert_eq!(board.positions_of(Color::Cyan).len(), 15);
        assert!(board.positions_of(Color::Green).is_empty());

        let board = Board::new_game(PlayerCount::Three);
        for &color in PlayerCount::Three.setup() {
            assert_eq!(board.positions_of(color).len(), 10);
        }
    }

    #[test]
    fn test_render_distance() {
        // Neighbors are exactly one unit apart in every direction
        for dir in 0..6 {
            assert_eq!(Coord::new(0, 0).render_distance(Coord::new(0, 0).neighbor(dir)), 1);
        }
        assert_eq!(Coord::new(0, 0).render_distance(Coord::new(4, 0)), 4);
        // sqrt(3) and sqrt(7)
        assert_eq!(Coord::new(0, 0).render_distance(Coord::new(1, 1)), 2);
        assert_eq!(Coord::new(0, 0).render_distance(Coord::new(2, 1)), 3);
    }

    #[test]
    fn test_grid_order() {
        let coords: Vec<Coord> = all_coords().collect();
        assert_eq!(coords.len(), GRID_CELLS);
        assert_eq!(coords[0], Coord::new(-8, -8));
        assert_eq!(coords[1], Coord::new(-8, -7));
        assert_eq!(coords[SIDE], Coord::new(-7, -8));
        for (i, pos) in coords.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
    }
}
