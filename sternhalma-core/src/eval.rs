//! Position evaluation

use crate::game::GameState;
use crate::pieces::{CellState, Color};

/// Terminal sentinel scores. The heuristic never produces them naturally.
pub const WIN_SCORE: i32 = i32::MAX;
pub const LOSS_SCORE: i32 = i32::MIN;

/// Bonus for a piece on target cell `i` is `TARGET_BONUS - INDEX_STEP * i`
const TARGET_BONUS: i32 = 1000;
/// Penalty for a piece still on home cell `j` is `HOME_PENALTY - INDEX_STEP * j`
const HOME_PENALTY: i32 = 2000;
const INDEX_STEP: i32 = 50;
/// Scale for squared distance to each unfilled target cell
const DISTANCE_WEIGHT: i32 = 8;

/// Score `state` for `color`. Higher is better for `color`.
///
/// Raw score accumulates per piece: reaching a target cell lowers it,
/// sitting on a home cell raises it, and every unfilled target cell adds
/// `8 * d^2` for render-space distance `d`. The negated sum is returned.
pub fn evaluate(state: &GameState, color: Color) -> i32 {
    let board = state.board();
    let target = board.target_nest(color);
    let home = board.nest(color);
    let mine = CellState::Occupied(color);

    let unfilled: Vec<_> = target
        .iter()
        .copied()
        .filter(|&t| board.cell_at(t) != mine)
        .collect();

    let mut score = 0i32;

    for pos in board.positions_of(color) {
        if let Some(i) = target.iter().position(|&t| t == pos) {
            score -= TARGET_BONUS - INDEX_STEP * i as i32;
        }
        if let Some(j) = home.iter().position(|&h| h == pos) {
            score += HOME_PENALTY - INDEX_STEP * j as i32;
        }
        for &t in &unfilled {
            let d = pos.render_distance(t);
            score += DISTANCE_WEIGHT * d * d;
        }
    }

    -score
}

/// Whether a score is one of the terminal sentinels
pub fn is_terminal(score: i32) -> bool {
    score == WIN_SCORE || score == LOSS_SCORE
}
