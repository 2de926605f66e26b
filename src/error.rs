use std::path::PathBuf;

use crate::game::{BoardKind, MoveError};

/// Wiring errors: a strategy, board or identifier used outside its contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{strategy} requires the {expected} board, got the {found} board")]
    BoardMismatch {
        strategy: &'static str,
        expected: BoardKind,
        found: BoardKind,
    },

    #[error("{operation} is not supported by the {board} board")]
    Unsupported {
        operation: &'static str,
        board: BoardKind,
    },

    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("unknown strategy '{0}' (expected minimax-array, minimax-graph, monte-carlo-array or monte-carlo-graph)")]
    UnknownStrategy(String),

    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("unknown board kind '{0}' (expected array or graph)")]
    UnknownBoardKind(String),
}

/// Errors raised by a [`Game`](crate::game::Game) session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("the game is already over")]
    GameOver,

    #[error("no engine is bound to this game")]
    NoEngine,

    #[error("it is not the engine's turn")]
    NotEngineTurn,

    #[error("the first engine must play Player and the second Opponent")]
    SideConflict,

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors that can occur when parsing a text grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell '{symbol}' at row {row}, column {col}")]
    UnknownCell { symbol: char, row: usize, col: usize },

    #[error("stone at row {row}, column {col} has an empty cell below it")]
    Floating { row: usize, col: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
