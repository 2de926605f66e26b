use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

use super::array_board::ArrayBoard;
use super::board::{render, Board, Grid, LastMove, MoveError, Position};
use super::cell::{CellState, Side};
use super::graph_board::GraphBoard;
use super::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    Array,
    Graph,
}

impl BoardKind {
    pub fn name(self) -> &'static str {
        match self {
            BoardKind::Array => "array",
            BoardKind::Graph => "graph",
        }
    }
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A board of either representation, for callers that pick one at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyBoard {
    Array(ArrayBoard),
    Graph(GraphBoard),
}

impl AnyBoard {
    /// Empty board of the given kind
    pub fn new(kind: BoardKind) -> Self {
        match kind {
            BoardKind::Array => AnyBoard::Array(ArrayBoard::new()),
            BoardKind::Graph => AnyBoard::Graph(GraphBoard::new()),
        }
    }

    /// Board of the given kind holding `grid`, with no recorded last move
    pub fn from_grid(kind: BoardKind, grid: Grid) -> Self {
        match kind {
            BoardKind::Array => AnyBoard::Array(ArrayBoard::from_grid(grid)),
            BoardKind::Graph => AnyBoard::Graph(GraphBoard::from_grid(grid)),
        }
    }

    /// Same position in the other representation
    pub fn convert(&self, kind: BoardKind) -> AnyBoard {
        if self.kind() == kind {
            return self.clone();
        }
        let mut converted = AnyBoard::from_grid(kind, self.grid());
        converted.set_last_move(self.last_move());
        converted
    }

    fn set_last_move(&mut self, last: Option<LastMove>) {
        match self {
            AnyBoard::Array(board) => board.set_last_move(last),
            AnyBoard::Graph(board) => board.set_last_move(last),
        }
    }
}

impl From<ArrayBoard> for AnyBoard {
    fn from(board: ArrayBoard) -> Self {
        AnyBoard::Array(board)
    }
}

impl From<GraphBoard> for AnyBoard {
    fn from(board: GraphBoard) -> Self {
        AnyBoard::Graph(board)
    }
}

impl Board for AnyBoard {
    fn kind(&self) -> BoardKind {
        match self {
            AnyBoard::Array(_) => BoardKind::Array,
            AnyBoard::Graph(_) => BoardKind::Graph,
        }
    }

    fn cell(&self, row: usize, col: usize) -> CellState {
        match self {
            AnyBoard::Array(board) => board.cell(row, col),
            AnyBoard::Graph(board) => board.cell(row, col),
        }
    }

    fn apply_move(&mut self, col: usize, side: Side) -> Result<Position, MoveError> {
        match self {
            AnyBoard::Array(board) => board.apply_move(col, side),
            AnyBoard::Graph(board) => board.apply_move(col, side),
        }
    }

    fn last_move(&self) -> Option<LastMove> {
        match self {
            AnyBoard::Array(board) => board.last_move(),
            AnyBoard::Graph(board) => board.last_move(),
        }
    }

    fn is_full(&self) -> bool {
        match self {
            AnyBoard::Array(board) => board.is_full(),
            AnyBoard::Graph(board) => board.is_full(),
        }
    }

    fn evaluate(&self, side: Side) -> i32 {
        match self {
            AnyBoard::Array(board) => board.evaluate(side),
            AnyBoard::Graph(board) => board.evaluate(side),
        }
    }

    fn heuristic(&self, side: Side) -> i32 {
        match self {
            AnyBoard::Array(board) => board.heuristic(side),
            AnyBoard::Graph(board) => board.heuristic(side),
        }
    }

    fn node(&self, row: usize, col: usize) -> Result<Node, EngineError> {
        match self {
            AnyBoard::Array(board) => board.node(row, col),
            AnyBoard::Graph(board) => board.node(row, col),
        }
    }
}

impl fmt::Display for AnyBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

/// A concrete representation that strategies can be specialised on.
pub trait Representation: Board + 'static {
    const KIND: BoardKind;

    /// Borrow the concrete board, or `None` if `board` is the other kind
    fn downcast(board: &AnyBoard) -> Option<&Self>;
}

impl Representation for ArrayBoard {
    const KIND: BoardKind = BoardKind::Array;

    fn downcast(board: &AnyBoard) -> Option<&Self> {
        match board {
            AnyBoard::Array(board) => Some(board),
            AnyBoard::Graph(_) => None,
        }
    }
}

impl Representation for GraphBoard {
    const KIND: BoardKind = BoardKind::Graph;

    fn downcast(board: &AnyBoard) -> Option<&Self> {
        match board {
            AnyBoard::Graph(board) => Some(board),
            AnyBoard::Array(_) => None,
        }
    }
}

impl FromStr for BoardKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(BoardKind::Array),
            "graph" => Ok(BoardKind::Graph),
            _ => Err(EngineError::UnknownBoardKind(s.to_string())),
        }
    }
}
