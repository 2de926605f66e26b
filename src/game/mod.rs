//! Core Connect Four game logic: the board capability set, its dense-grid and
//! graph representations, the shared static evaluator, and the game session.

mod any_board;
mod array_board;
mod board;
mod cell;
pub mod eval;
mod graph_board;
mod node;
mod session;

pub use any_board::{AnyBoard, BoardKind, Representation};
pub use array_board::ArrayBoard;
pub use board::{
    parse_grid, Board, Grid, LastMove, MoveError, Position, CELLS, CENTER_COL, COLS, DIRECTIONS,
    ROWS,
};
pub use cell::{CellState, Side};
pub use graph_board::GraphBoard;
pub use node::{Node, NEIGHBOR_OFFSETS};
pub use session::{Duel, Game, GameOutcome};
