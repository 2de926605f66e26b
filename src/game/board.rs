use std::fmt;

use crate::error::{EngineError, ParseBoardError};

use super::any_board::BoardKind;
use super::cell::{CellState, Side};
use super::eval;
use super::node::Node;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELLS: usize = ROWS * COLS;
pub const CENTER_COL: usize = COLS / 2;

/// The four alignment axes: horizontal, vertical, `\` and `/`.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Dense occupancy grid. Row 0 is the top, row 5 is the bottom.
pub type Grid = [[CellState; COLS]; ROWS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Record of the most recent stone, used to check for a win without a rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub position: Position,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is out of range")]
    InvalidColumn,
    #[error("column is full")]
    ColumnFull,
}

/// Capability set shared by every board representation.
///
/// Boards are values: [`Board::play`] returns a fresh board and never touches
/// the one it was called on, so search branches can't contaminate each other.
pub trait Board: Clone + fmt::Debug + Send + Sync {
    /// Which representation this is
    fn kind(&self) -> BoardKind;

    /// Cell at `(row, col)`; `Empty` outside the board
    fn cell(&self, row: usize, col: usize) -> CellState;

    /// Drop a stone for `side` into `col`, returning where it landed.
    /// Records the stone as the last move.
    fn apply_move(&mut self, col: usize, side: Side) -> Result<Position, MoveError>;

    fn last_move(&self) -> Option<LastMove>;

    /// True iff no column has room
    fn is_full(&self) -> bool;

    /// Heuristic score of the position from `side`'s point of view
    fn evaluate(&self, side: Side) -> i32;

    /// Positional score without the won/full override of [`Board::evaluate`]
    fn heuristic(&self, side: Side) -> i32 {
        eval::pattern_score(self, side) + eval::center_score(self, side)
    }

    /// Side due to move, counting stones with Player moving first.
    /// `None` when the counts can't come from alternating play.
    fn side_to_move(&self) -> Option<Side> {
        let grid = self.grid();
        let count = |state: CellState| grid.iter().flatten().filter(|&&cell| cell == state).count();
        match (count(CellState::Player), count(CellState::Opponent)) {
            (player, opponent) if player == opponent => Some(Side::Player),
            (player, opponent) if player == opponent + 1 => Some(Side::Opponent),
            _ => None,
        }
    }

    /// Graph node at `(row, col)`. Only the graph representation has nodes.
    fn node(&self, _row: usize, _col: usize) -> Result<Node, EngineError> {
        Err(EngineError::Unsupported {
            operation: "node",
            board: self.kind(),
        })
    }

    fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cell(0, col) != CellState::Empty
    }

    /// Playable columns in ascending order
    fn available_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Check if the stone at (row, col) is part of a run of four or more
    fn check_victory(&self, row: usize, col: usize) -> bool {
        let cell = self.cell(row, col);
        if cell == CellState::Empty {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + count_in_direction(self, row, col, dr, dc, cell)
                + count_in_direction(self, row, col, -dr, -dc, cell);
            count >= 4
        })
    }

    /// The side owning a run of four, if any.
    ///
    /// With a recorded last move only that stone is checked. Boards built
    /// without one (parsed grids) fall back to scanning every cell.
    fn winner(&self) -> Option<Side> {
        if let Some(last) = self.last_move() {
            let Position { row, col } = last.position;
            return self.check_victory(row, col).then_some(last.side);
        }

        for row in 0..ROWS {
            for col in 0..COLS {
                if self.check_victory(row, col) {
                    return self.cell(row, col).side();
                }
            }
        }
        None
    }

    fn has_winner(&self) -> bool {
        self.winner().is_some()
    }

    /// Copy of this board with `side` dropped into `col`
    fn play(&self, col: usize, side: Side) -> Result<Self, MoveError> {
        let mut next = self.clone();
        next.apply_move(col, side)?;
        Ok(next)
    }

    /// Snapshot of every cell
    fn grid(&self) -> Grid {
        let mut grid = [[CellState::Empty; COLS]; ROWS];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.cell(row, col);
            }
        }
        grid
    }
}

/// Number of consecutive `cell` stones after (row, col) along (dr, dc),
/// not counting (row, col) itself
fn count_in_direction<B: Board + ?Sized>(
    board: &B,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    cell: CellState,
) -> usize {
    let mut count = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while in_bounds(r, c) && board.cell(r as usize, c as usize) == cell {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

pub(crate) fn in_bounds(row: isize, col: isize) -> bool {
    row >= 0 && row < ROWS as isize && col >= 0 && col < COLS as isize
}

/// Lowest empty row of `col` in `grid`
pub(crate) fn landing_row(grid: &Grid, col: usize) -> Result<usize, MoveError> {
    if col >= COLS {
        return Err(MoveError::InvalidColumn);
    }
    (0..ROWS)
        .rev()
        .find(|&row| grid[row][col] == CellState::Empty)
        .ok_or(MoveError::ColumnFull)
}

/// Parse a six-line text grid (`.` empty, `X` player, `O` opponent), top row
/// first. Blank lines and surrounding whitespace are ignored.
pub fn parse_grid(text: &str) -> Result<Grid, ParseBoardError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() != ROWS {
        return Err(ParseBoardError::RowCount {
            expected: ROWS,
            found: lines.len(),
        });
    }

    let mut grid = [[CellState::Empty; COLS]; ROWS];
    for (row, line) in lines.iter().enumerate() {
        let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != COLS {
            return Err(ParseBoardError::RowWidth {
                row,
                expected: COLS,
                found: symbols.len(),
            });
        }
        for (col, &symbol) in symbols.iter().enumerate() {
            grid[row][col] = CellState::from_symbol(symbol)
                .ok_or(ParseBoardError::UnknownCell { symbol, row, col })?;
        }
    }

    // Stones obey gravity
    for row in 0..ROWS - 1 {
        for col in 0..COLS {
            if grid[row][col] != CellState::Empty && grid[row + 1][col] == CellState::Empty {
                return Err(ParseBoardError::Floating { row, col });
            }
        }
    }

    Ok(grid)
}

/// Write the board in the text grid format accepted by [`parse_grid`]
pub(crate) fn render<B: Board + ?Sized>(board: &B, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in 0..ROWS {
        let line: String = (0..COLS).map(|col| board.cell(row, col).symbol()).collect();
        writeln!(f, "{line}")?;
    }
    let footer: String = (0..COLS).map(|col| char::from(b'0' + col as u8)).collect();
    write!(f, "{footer}")
}
