//! Static evaluator shared by both board representations.
//!
//! Every occupied cell opens a 4-cell window along each alignment axis;
//! windows that run off the board are skipped. Each window is scored on
//! its mix of own, opposing and empty cells, then a centre column bonus
//! is added. Terminal positions short-circuit to [`WIN_SCORE`] or 0.

use super::board::{in_bounds, Board, CENTER_COL, COLS, DIRECTIONS, ROWS};
use super::cell::{CellState, Side};

/// Score of a decided position
pub const WIN_SCORE: i32 = 100_000;

const CENTER_WEIGHT: i32 = 3;

/// Score for one window given counts of own, opposing and empty cells.
pub fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
    let mut score = 0;
    if own == 4 {
        score += 100;
    } else if own == 3 && empty == 1 {
        score += 10;
    } else if own == 2 && empty == 2 {
        score += 2;
    }

    // Blocking outweighs building
    if opp == 3 && empty == 1 {
        score -= 80;
    }
    score
}

/// `Some(±WIN_SCORE)` for a won position, `Some(0)` for a full board.
pub fn terminal_score<B: Board + ?Sized>(board: &B, side: Side) -> Option<i32> {
    if let Some(winner) = board.winner() {
        return Some(if winner == side { WIN_SCORE } else { -WIN_SCORE });
    }
    if board.is_full() {
        return Some(0);
    }
    None
}

/// Sum of window scores over every window anchored on an occupied cell.
pub fn pattern_score<B: Board + ?Sized>(board: &B, side: Side) -> i32 {
    let own_cell = side.cell();
    let opp_cell = side.other().cell();
    let mut score = 0;

    for row in 0..ROWS {
        for col in 0..COLS {
            if board.cell(row, col) == CellState::Empty {
                continue;
            }
            for &(dr, dc) in &DIRECTIONS {
                let end_row = row as isize + 3 * dr;
                let end_col = col as isize + 3 * dc;
                if !in_bounds(end_row, end_col) {
                    continue;
                }

                let (mut own, mut opp, mut empty) = (0, 0, 0);
                for i in 0..4 {
                    let r = (row as isize + i * dr) as usize;
                    let c = (col as isize + i * dc) as usize;
                    match board.cell(r, c) {
                        cell if cell == own_cell => own += 1,
                        cell if cell == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += score_window(own, opp, empty);
            }
        }
    }

    score
}

/// +3 per own stone in the centre column, -3 per opposing stone.
pub fn center_score<B: Board + ?Sized>(board: &B, side: Side) -> i32 {
    (0..ROWS)
        .map(|row| match board.cell(row, CENTER_COL).side() {
            Some(owner) if owner == side => CENTER_WEIGHT,
            Some(_) => -CENTER_WEIGHT,
            None => 0,
        })
        .sum()
}

/// Full evaluation: terminal override, else the board's heuristic.
pub fn evaluate<B: Board + ?Sized>(board: &B, side: Side) -> i32 {
    terminal_score(board, side).unwrap_or_else(|| board.heuristic(side))
}
