use tracing::{debug, info};

use crate::ai::Strategy;
use crate::error::TurnError;

use super::any_board::{AnyBoard, BoardKind};
use super::board::{Board, Position};
use super::cell::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Side),
    Draw,
}

/// One game on a single authoritative board, optionally against an engine.
///
/// Player always moves first. The engine, when bound, plays the side it was
/// built for.
pub struct Game {
    board: AnyBoard,
    turn: Side,
    outcome: Option<GameOutcome>,
    engine: Option<Box<dyn Strategy>>,
}

impl Game {
    /// Two-sided game with no engine
    pub fn new(kind: BoardKind) -> Self {
        Game {
            board: AnyBoard::new(kind),
            turn: Side::Player,
            outcome: None,
            engine: None,
        }
    }

    /// Game against `engine`, on the board representation it requires
    pub fn against(engine: Box<dyn Strategy>) -> Self {
        Game {
            board: AnyBoard::new(engine.board_kind()),
            turn: Side::Player,
            outcome: None,
            engine: Some(engine),
        }
    }

    /// Start over on an empty board of the same kind
    pub fn reset(&mut self) {
        self.board = AnyBoard::new(self.board.kind());
        self.turn = Side::Player;
        self.outcome = None;
    }

    pub fn board(&self) -> &AnyBoard {
        &self.board
    }

    /// Side to move
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Side the bound engine plays, if any
    pub fn engine_side(&self) -> Option<Side> {
        self.engine.as_ref().map(|engine| engine.side())
    }

    /// Drop a stone for the side to move
    pub fn play(&mut self, col: usize) -> Result<Position, TurnError> {
        if self.is_over() {
            return Err(TurnError::GameOver);
        }

        let side = self.turn;
        let pos = self.board.apply_move(col, side)?;
        debug!(side = side.name(), col, row = pos.row, "stone placed");

        if self.board.check_victory(pos.row, pos.col) {
            self.outcome = Some(GameOutcome::Winner(side));
            info!(winner = side.name(), "game won");
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
            info!("game drawn");
        }

        self.turn = side.other();
        Ok(pos)
    }

    /// Let the bound engine choose and play a column.
    ///
    /// Returns `Ok(None)` when the engine has no legal move; the game is then
    /// over.
    pub fn engine_turn(&mut self) -> Result<Option<Position>, TurnError> {
        if self.is_over() {
            return Err(TurnError::GameOver);
        }
        let engine = self.engine.as_mut().ok_or(TurnError::NoEngine)?;
        if engine.side() != self.turn {
            return Err(TurnError::NotEngineTurn);
        }

        let Some(col) = engine.choose_move(&self.board)? else {
            self.outcome = Some(GameOutcome::Draw);
            return Ok(None);
        };
        self.play(col).map(Some)
    }
}

/// Headless engine-versus-engine match.
///
/// Each engine keeps a board of the representation it requires and both
/// boards receive every move. The first engine plays Player and moves first.
pub struct Duel {
    engines: [Box<dyn Strategy>; 2],
    boards: [AnyBoard; 2],
    turn: Side,
    outcome: Option<GameOutcome>,
    moves: Vec<Position>,
}

impl Duel {
    pub fn new(first: Box<dyn Strategy>, second: Box<dyn Strategy>) -> Result<Self, TurnError> {
        if first.side() != Side::Player || second.side() != Side::Opponent {
            return Err(TurnError::SideConflict);
        }
        let boards = [
            AnyBoard::new(first.board_kind()),
            AnyBoard::new(second.board_kind()),
        ];
        Ok(Duel {
            engines: [first, second],
            boards,
            turn: Side::Player,
            outcome: None,
            moves: Vec::new(),
        })
    }

    /// Shared position, as seen by the first engine
    pub fn board(&self) -> &AnyBoard {
        &self.boards[0]
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Every stone placed so far, in order
    pub fn moves(&self) -> &[Position] {
        &self.moves
    }

    /// Let the engine to move pick a column and apply it to both boards.
    pub fn step(&mut self) -> Result<Option<Position>, TurnError> {
        if self.outcome.is_some() {
            return Err(TurnError::GameOver);
        }

        let side = self.turn;
        let idx = match side {
            Side::Player => 0,
            Side::Opponent => 1,
        };
        let Some(col) = self.engines[idx].choose_move(&self.boards[idx])? else {
            self.outcome = Some(GameOutcome::Draw);
            info!("duel drawn, no move left");
            return Ok(None);
        };

        let pos = self.boards[0].apply_move(col, side)?;
        self.boards[1].apply_move(col, side)?;
        self.moves.push(pos);
        debug!(
            engine = self.engines[idx].name(),
            side = side.name(),
            col,
            row = pos.row,
            "duel move"
        );

        if self.boards[0].check_victory(pos.row, pos.col) {
            self.outcome = Some(GameOutcome::Winner(side));
            info!(winner = side.name(), moves = self.moves.len(), "duel won");
        } else if self.boards[0].is_full() {
            self.outcome = Some(GameOutcome::Draw);
            info!("duel drawn");
        }

        self.turn = side.other();
        Ok(Some(pos))
    }

    /// Play to the end
    pub fn run(&mut self) -> Result<GameOutcome, TurnError> {
        loop {
            self.step()?;
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
        }
    }
}
