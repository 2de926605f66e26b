use std::fmt;

use crate::error::EngineError;

use super::any_board::BoardKind;
use super::board::{render, Board, Grid, LastMove, MoveError, Position, CELLS, COLS, ROWS};
use super::cell::{CellState, Side};
use super::eval;
use super::node::Node;

/// Weight of the largest connected group in the graph evaluation
const COMPONENT_WEIGHT: i32 = 5;

/// Board stored as an arena of [`Node`]s indexed by `row * COLS + col`.
///
/// Adjacency is the 8-neighbourhood of each node and is derived from
/// coordinates, so a copy of the arena is already a fully linked graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphBoard {
    nodes: [Node; CELLS],
    last: Option<LastMove>,
}

fn index(row: usize, col: usize) -> usize {
    row * COLS + col
}

impl GraphBoard {
    pub fn new() -> Self {
        GraphBoard {
            nodes: std::array::from_fn(|i| Node::new(i / COLS, i % COLS)),
            last: None,
        }
    }

    /// Board holding `grid`, with no recorded last move
    pub fn from_grid(grid: Grid) -> Self {
        let mut board = Self::new();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                board.nodes[index(row, col)].set_state(cell);
            }
        }
        board
    }

    pub(crate) fn set_last_move(&mut self, last: Option<LastMove>) {
        self.last = last;
    }

    /// All nodes, top row first
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Nodes adjacent to `node`, orthogonally or diagonally
    pub fn neighbors<'a>(&'a self, node: &Node) -> impl Iterator<Item = &'a Node> + 'a {
        node.neighbor_positions()
            .map(move |pos| &self.nodes[index(pos.row, pos.col)])
    }

    /// Groups of `side` stones connected through neighbour edges.
    pub fn connected_components(&self, side: Side) -> Vec<Vec<Position>> {
        let target = side.cell();
        let mut visited = [false; CELLS];
        let mut components = Vec::new();

        for start in self.nodes.iter() {
            let start_idx = index(start.row(), start.col());
            if start.state() != target || visited[start_idx] {
                continue;
            }

            // Depth-first walk with an explicit stack
            let mut component = Vec::new();
            let mut stack = vec![start_idx];
            visited[start_idx] = true;
            while let Some(idx) = stack.pop() {
                let node = &self.nodes[idx];
                component.push(node.position());
                for neighbor in self.neighbors(node) {
                    let n_idx = index(neighbor.row(), neighbor.col());
                    if neighbor.state() == target && !visited[n_idx] {
                        visited[n_idx] = true;
                        stack.push(n_idx);
                    }
                }
            }
            components.push(component);
        }

        components
    }

    /// Size of the largest connected group of `side` stones (0 if none)
    pub fn largest_component(&self, side: Side) -> usize {
        self.connected_components(side)
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }
}

impl Default for GraphBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for GraphBoard {
    fn kind(&self) -> BoardKind {
        BoardKind::Graph
    }

    fn cell(&self, row: usize, col: usize) -> CellState {
        if row >= ROWS || col >= COLS {
            return CellState::Empty;
        }
        self.nodes[index(row, col)].state()
    }

    fn apply_move(&mut self, col: usize, side: Side) -> Result<Position, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn);
        }

        let row = (0..ROWS)
            .rev()
            .find(|&row| self.nodes[index(row, col)].state() == CellState::Empty)
            .ok_or(MoveError::ColumnFull)?;
        self.nodes[index(row, col)].set_state(side.cell());

        let position = Position::new(row, col);
        self.last = Some(LastMove { position, side });
        Ok(position)
    }

    fn last_move(&self) -> Option<LastMove> {
        self.last
    }

    /// Scans the top row; the graph board keeps no stone counter.
    fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.nodes[index(0, col)].state() != CellState::Empty)
    }

    fn evaluate(&self, side: Side) -> i32 {
        eval::evaluate(self, side)
    }

    /// Shared terms plus a bonus for the largest connected group.
    fn heuristic(&self, side: Side) -> i32 {
        eval::pattern_score(self, side)
            + eval::center_score(self, side)
            + COMPONENT_WEIGHT * self.largest_component(side) as i32
    }

    fn node(&self, row: usize, col: usize) -> Result<Node, EngineError> {
        if row >= ROWS || col >= COLS {
            return Err(EngineError::OutOfBounds { row, col });
        }
        Ok(self.nodes[index(row, col)])
    }
}

impl fmt::Display for GraphBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}
