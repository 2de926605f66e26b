use super::board::{in_bounds, Position};
use super::cell::CellState;

/// Row/column offsets of the eight neighbours (orthogonal and diagonal).
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (-1, 1),
    (1, 0),
    (-1, 0),
    (0, -1),
    (1, -1),
    (-1, -1),
];

/// A cell of the graph board.
///
/// Edges are structural: a node's neighbours depend only on its coordinates,
/// so they are computed on demand instead of stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    row: usize,
    col: usize,
    state: CellState,
}

impl Node {
    pub fn new(row: usize, col: usize) -> Self {
        Node {
            row,
            col,
            state: CellState::Empty,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Coordinates of every in-bounds neighbour
    pub fn neighbor_positions(&self) -> impl Iterator<Item = Position> {
        let (row, col) = (self.row as isize, self.col as isize);
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            in_bounds(r, c).then(|| Position::new(r as usize, c as usize))
        })
    }
}
