use std::fmt;

use super::any_board::BoardKind;
use super::board::{landing_row, render, Board, Grid, LastMove, MoveError, Position, CELLS, COLS, ROWS};
use super::cell::{CellState, Side};
use super::eval;

/// Dense 6x7 grid board. Copying it is a plain array copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayBoard {
    cells: Grid,
    move_count: usize,
    last: Option<LastMove>,
}

impl ArrayBoard {
    /// Create a new empty board
    pub fn new() -> Self {
        ArrayBoard {
            cells: [[CellState::Empty; COLS]; ROWS],
            move_count: 0,
            last: None,
        }
    }

    /// Board holding `grid`, with no recorded last move
    pub fn from_grid(grid: Grid) -> Self {
        let move_count = grid
            .iter()
            .flatten()
            .filter(|&&cell| cell != CellState::Empty)
            .count();
        ArrayBoard {
            cells: grid,
            move_count,
            last: None,
        }
    }

    pub(crate) fn set_last_move(&mut self, last: Option<LastMove>) {
        self.last = last;
    }

    /// Total stones placed
    pub fn move_count(&self) -> usize {
        self.move_count
    }
}

impl Default for ArrayBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for ArrayBoard {
    fn kind(&self) -> BoardKind {
        BoardKind::Array
    }

    fn cell(&self, row: usize, col: usize) -> CellState {
        if row >= ROWS || col >= COLS {
            return CellState::Empty;
        }
        self.cells[row][col]
    }

    fn apply_move(&mut self, col: usize, side: Side) -> Result<Position, MoveError> {
        let row = landing_row(&self.cells, col)?;
        self.cells[row][col] = side.cell();
        self.move_count += 1;

        let position = Position::new(row, col);
        self.last = Some(LastMove { position, side });
        Ok(position)
    }

    fn last_move(&self) -> Option<LastMove> {
        self.last
    }

    fn is_full(&self) -> bool {
        self.move_count >= CELLS
    }

    fn evaluate(&self, side: Side) -> i32 {
        eval::evaluate(self, side)
    }

    fn grid(&self) -> Grid {
        self.cells
    }
}

impl fmt::Display for ArrayBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}
