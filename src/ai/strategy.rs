use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;
use crate::game::{AnyBoard, Board, BoardKind, Side};

use super::factory::StrategyKind;

/// Difficulty tier; fixes minimax depth and Monte Carlo budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Plies searched by minimax
    pub fn search_depth(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 5,
            Difficulty::Hard => 7,
        }
    }

    /// Total rollouts per Monte Carlo decision
    pub fn simulation_budget(self) -> usize {
        match self {
            Difficulty::Easy => 1_000,
            Difficulty::Medium => 5_000,
            Difficulty::Hard => 10_000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// How a move was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// No legal column
    NoMove,
    /// The column wins on the spot
    ImmediateWin,
    /// The column stops an immediate opponent win
    Block,
    /// Chosen by search or rollouts
    Search,
}

/// Score a strategy gave one candidate column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveScore {
    pub column: usize,
    pub score: f64,
}

/// Outcome of one decision, with the telemetry gathered while making it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    /// Chosen column, `None` when no column is playable
    pub column: Option<usize>,
    pub decision: Decision,
    /// Per-candidate scores in ascending column order (empty on short-circuit)
    pub scores: Vec<MoveScore>,
    /// Alpha-beta cutoffs taken
    pub pruned: u64,
    /// Random games played
    pub rollouts: u64,
}

impl SearchReport {
    pub fn no_move() -> Self {
        SearchReport {
            column: None,
            decision: Decision::NoMove,
            scores: Vec::new(),
            pruned: 0,
            rollouts: 0,
        }
    }

    pub fn short_circuit(column: usize, decision: Decision) -> Self {
        SearchReport {
            column: Some(column),
            decision,
            scores: Vec::new(),
            pruned: 0,
            rollouts: 0,
        }
    }

    /// Score of `column`, if it was evaluated
    pub fn score_of(&self, column: usize) -> Option<f64> {
        self.scores
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.score)
    }
}

/// Universal interface for all move-selection strategies.
///
/// A strategy is configured once and reused every turn; it never keeps
/// position state between calls and never mutates the board it is given.
pub trait Strategy: Send {
    /// Display name, e.g. "Minimax Array"
    fn name(&self) -> &str;

    fn kind(&self) -> StrategyKind;

    /// Side this strategy plays
    fn side(&self) -> Side;

    fn difficulty(&self) -> Difficulty;

    /// Board representation this strategy works on
    fn board_kind(&self) -> BoardKind {
        self.kind().board_kind()
    }

    /// Decide a move and report how it was reached.
    ///
    /// Fails with [`EngineError::BoardMismatch`] if `board` is not the
    /// representation this strategy is bound to.
    fn search(&mut self, board: &AnyBoard) -> Result<SearchReport, EngineError>;

    /// Column to play, or `None` if the board has no legal column
    fn choose_move(&mut self, board: &AnyBoard) -> Result<Option<usize>, EngineError> {
        Ok(self.search(board)?.column)
    }
}

pub(crate) fn mismatch(strategy: &'static str, expected: BoardKind, board: &AnyBoard) -> EngineError {
    EngineError::BoardMismatch {
        strategy,
        expected,
        found: board.kind(),
    }
}

/// True if `side` dropping into `col` wins on the spot
pub(crate) fn wins_with<B: Board>(board: &B, col: usize, side: Side) -> bool {
    board
        .play(col, side)
        .is_ok_and(|next| next.winner() == Some(side))
}

/// One-ply safety net run before search: take a win, else block one.
/// Columns are tried in the order given and the first match returns.
pub(crate) fn screen_immediate<B: Board>(
    board: &B,
    side: Side,
    legal: &[usize],
) -> Option<(usize, Decision)> {
    if let Some(&col) = legal.iter().find(|&&col| wins_with(board, col, side)) {
        return Some((col, Decision::ImmediateWin));
    }
    legal
        .iter()
        .find(|&&col| wins_with(board, col, side.other()))
        .map(|&col| (col, Decision::Block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ArrayBoard;

    #[test]
    fn test_difficulty_tiers() {
        assert_eq!(Difficulty::Easy.search_depth(), 3);
        assert_eq!(Difficulty::Medium.search_depth(), 5);
        assert_eq!(Difficulty::Hard.search_depth(), 7);
        assert_eq!(Difficulty::Easy.simulation_budget(), 1_000);
        assert_eq!(Difficulty::Medium.simulation_budget(), 5_000);
        assert_eq!(Difficulty::Hard.simulation_budget(), 10_000);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "nightmare".parse::<Difficulty>(),
            Err(EngineError::UnknownDifficulty("nightmare".into()))
        );
    }

    #[test]
    fn test_screen_prefers_win_over_block() {
        // Both sides have three on their own row; the win comes first.
        let mut board = ArrayBoard::new();
        for col in 0..3 {
            board.apply_move(col, Side::Player).unwrap();
            board.apply_move(col, Side::Opponent).unwrap();
        }
        let legal = board.available_columns();
        assert_eq!(
            screen_immediate(&board, Side::Player, &legal),
            Some((3, Decision::ImmediateWin))
        );
        assert_eq!(
            screen_immediate(&board, Side::Opponent, &legal),
            Some((3, Decision::Block))
        );
    }

    #[test]
    fn test_screen_finds_nothing_on_quiet_board() {
        let mut board = ArrayBoard::new();
        board.apply_move(3, Side::Player).unwrap();
        let legal = board.available_columns();
        assert_eq!(screen_immediate(&board, Side::Opponent, &legal), None);
    }

    #[test]
    fn test_report_score_lookup() {
        let report = SearchReport {
            column: Some(2),
            decision: Decision::Search,
            scores: vec![
                MoveScore { column: 1, score: -3.0 },
                MoveScore { column: 2, score: 8.0 },
            ],
            pruned: 4,
            rollouts: 0,
        };
        assert_eq!(report.score_of(2), Some(8.0));
        assert_eq!(report.score_of(5), None);
    }
}
