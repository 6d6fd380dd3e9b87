//! Turn-rotating minimax AI

use crate::eval::{evaluate, is_terminal};
use crate::game::GameState;
use crate::movegen::Move;
use crate::pieces::Color;

// ============================================================================
// STATISTICS
// ============================================================================

/// Counters for a single `select` call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose children were generated
    pub expanded: u64,
    /// Children generated across all expansions
    pub children: u64,
    /// Nodes returned unchanged (depth limit, sentinel, or no moves)
    pub leaves: u64,
}

// ============================================================================
// SEARCH
// ============================================================================

/// Choose the child of `state` the searching color should move to.
///
/// `rotation` is the seating order of active colors. At a maximizing node
/// `searching` moves; at a minimizing node the roster successor of
/// `searching` moves. Each child's mover is the successor of its parent's
/// mover, and a node maximizes exactly when its mover is `searching`.
///
/// Returns `state` unchanged at depth 0, on a sentinel score, or when the
/// mover has no moves.
pub fn select(
    state: &GameState,
    searching: Color,
    rotation: &[Color],
    depth: u32,
    maximizing: bool,
) -> GameState {
    select_with_stats(state, searching, rotation, depth, maximizing).0
}

/// `select` plus node counters
pub fn select_with_stats(
    state: &GameState,
    searching: Color,
    rotation: &[Color],
    depth: u32,
    maximizing: bool,
) -> (GameState, SearchStats) {
    let mover = if maximizing {
        searching
    } else {
        next_in_rotation(rotation, searching)
    };

    let mut search = Search {
        searching,
        rotation,
        stats: SearchStats::default(),
    };
    let best = search.node(state, mover, depth, maximizing);

    tracing::debug!(
        "search {} depth={}: expanded={} children={} leaves={}",
        searching,
        depth,
        search.stats.expanded,
        search.stats.children,
        search.stats.leaves
    );

    (best, search.stats)
}

/// The color seated after `color`, wrapping. Colors missing from the
/// rotation fall back to the first seat.
pub fn next_in_rotation(rotation: &[Color], color: Color) -> Color {
    match rotation.iter().position(|&c| c == color) {
        Some(i) => rotation[(i + 1) % rotation.len()],
        None => rotation.first().copied().unwrap_or(color),
    }
}

struct Search<'a> {
    searching: Color,
    rotation: &'a [Color],
    stats: SearchStats,
}

impl Search<'_> {
    fn node(
        &mut self,
        state: &GameState,
        mover: Color,
        depth: u32,
        maximizing: bool,
    ) -> GameState {
        if depth == 0 || is_terminal(evaluate(state, self.searching)) {
            self.stats.leaves += 1;
            return state.clone();
        }

        let children = state.expand(mover);
        if children.is_empty() {
            self.stats.leaves += 1;
            return state.clone();
        }
        self.stats.expanded += 1;
        self.stats.children += children.len() as u64;

        let next_mover = next_in_rotation(self.rotation, mover);
        let next_maximizing = next_mover == self.searching;

        let mut best: Option<(i32, GameState)> = None;
        for child in children {
            let reply = self.node(&child, next_mover, depth - 1, next_maximizing);
            let value = evaluate(&reply, self.searching);

            // Strict comparison: the first child seen wins ties
            let better = match &best {
                None => true,
                Some((best_value, _)) if maximizing => value > *best_value,
                Some((best_value, _)) => value < *best_value,
            };
            if better {
                best = Some((value, child));
            }
        }

        best.map(|(_, child)| child).unwrap_or_else(|| state.clone())
    }
}

// ============================================================================
// MINIMAX AI
// ============================================================================

/// Minimax AI player
#[derive(Clone, Debug)]
pub struct MinimaxAI {
    pub depth: u32,
}

impl MinimaxAI {
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    /// Best move for `color` from `state`, or `None` if the search
    /// returned the node unchanged
    pub fn best_move(&self, state: &GameState, color: Color, rotation: &[Color]) -> Option<Move> {
        let next = select(state, color, rotation, self.depth, true);
        state.diff(&next, color)
    }
}

// ============================================================================
// TESTS
// ============================================================================
