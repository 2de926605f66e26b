use serde::Serialize;

/// Occupancy of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Player,
    Opponent,
}

impl CellState {
    /// The side holding this cell, if any
    pub fn side(self) -> Option<Side> {
        match self {
            CellState::Empty => None,
            CellState::Player => Some(Side::Player),
            CellState::Opponent => Some(Side::Opponent),
        }
    }

    /// Character used by the text grid format
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Player => 'X',
            CellState::Opponent => 'O',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<CellState> {
        match symbol {
            '.' => Some(CellState::Empty),
            'X' | 'x' => Some(CellState::Player),
            'O' | 'o' => Some(CellState::Opponent),
            _ => None,
        }
    }
}

/// One of the two players. Player always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Convert side to the cell it occupies
    pub fn cell(self) -> CellState {
        match self {
            Side::Player => CellState::Player,
            Side::Opponent => CellState::Opponent,
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Opponent => "Opponent",
        }
    }
}
