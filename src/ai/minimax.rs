use std::marker::PhantomData;

use tracing::{debug, info};

use crate::error::EngineError;
use crate::game::{AnyBoard, ArrayBoard, BoardKind, GraphBoard, Representation, Side};

use super::factory::StrategyKind;
use super::strategy::{mismatch, screen_immediate, Decision, Difficulty, MoveScore, SearchReport, Strategy};

/// Depth-limited minimax with alpha-beta pruning over one board representation.
///
/// Before searching, an immediate win is taken and an immediate opponent win
/// is blocked. Candidate columns are searched in ascending order and a later
/// column only replaces the best one on a strictly greater score, so ties go
/// to the lowest column.
pub struct MinimaxAi<B> {
    side: Side,
    difficulty: Difficulty,
    depth: usize,
    _board: PhantomData<fn() -> B>,
}

pub type MinimaxArrayAi = MinimaxAi<ArrayBoard>;
pub type MinimaxGraphAi = MinimaxAi<GraphBoard>;

/// Per-call counters, dropped when the call returns
#[derive(Debug, Default)]
struct SearchStats {
    pruned: u64,
}

impl<B: Representation> MinimaxAi<B> {
    pub fn new(side: Side, difficulty: Difficulty) -> Self {
        Self::with_depth(side, difficulty, difficulty.search_depth())
    }

    /// Override the tier's depth. Depth is at least one ply.
    pub fn with_depth(side: Side, difficulty: Difficulty, depth: usize) -> Self {
        MinimaxAi {
            side,
            difficulty,
            depth: depth.max(1),
            _board: PhantomData,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn label() -> &'static str {
        match B::KIND {
            BoardKind::Array => "Minimax Array",
            BoardKind::Graph => "Minimax Graph",
        }
    }

    /// Decide a move on a board of this strategy's own representation.
    pub fn search_board(&self, board: &B) -> SearchReport {
        let legal = board.available_columns();
        if legal.is_empty() {
            return SearchReport::no_move();
        }
        debug!(
            strategy = Self::label(),
            side = self.side.name(),
            depth = self.depth,
            ?legal,
            "choosing move"
        );

        if let Some((col, decision)) = screen_immediate(board, self.side, &legal) {
            debug!(strategy = Self::label(), col, ?decision, "short-circuit");
            return SearchReport::short_circuit(col, decision);
        }

        let mut stats = SearchStats::default();
        let mut scores = Vec::with_capacity(legal.len());
        let mut best: Option<(usize, i32)> = None;

        for &col in &legal {
            let Ok(next) = board.play(col, self.side) else {
                continue;
            };
            let value = self.minimax(&next, self.depth - 1, false, i32::MIN, i32::MAX, &mut stats);
            debug!(strategy = Self::label(), col, value, "move evaluated");
            scores.push(MoveScore {
                column: col,
                score: f64::from(value),
            });

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((col, value));
            }
        }

        let Some((column, value)) = best else {
            return SearchReport::no_move();
        };
        info!(
            strategy = Self::label(),
            column,
            value,
            pruned = stats.pruned,
            "best move"
        );

        SearchReport {
            column: Some(column),
            decision: Decision::Search,
            scores,
            pruned: stats.pruned,
            rollouts: 0,
        }
    }

    fn minimax(
        &self,
        board: &B,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        stats: &mut SearchStats,
    ) -> i32 {
        if depth == 0 || board.has_winner() || board.is_full() {
            return board.evaluate(self.side);
        }

        let mover = if maximizing { self.side } else { self.side.other() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for col in board.available_columns() {
            let Ok(next) = board.play(col, mover) else {
                continue;
            };
            let value = self.minimax(&next, depth - 1, !maximizing, alpha, beta, stats);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if beta <= alpha {
                stats.pruned += 1;
                break;
            }
        }

        best
    }
}

impl<B: Representation> Strategy for MinimaxAi<B> {
    fn name(&self) -> &str {
        Self::label()
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::minimax(B::KIND)
    }

    fn side(&self) -> Side {
        self.side
    }

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn search(&mut self, board: &AnyBoard) -> Result<SearchReport, EngineError> {
        let concrete =
            B::downcast(board).ok_or_else(|| mismatch(Self::label(), B::KIND, board))?;
        Ok(self.search_board(concrete))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{parse_grid, Board};

    fn drops<B: Representation + Default>(moves: &[(usize, Side)]) -> B {
        let mut board = B::default();
        for &(col, side) in moves {
            board.apply_move(col, side).unwrap();
        }
        board
    }

    /// Player holds the bottom row 0..3, Opponent the row above it
    fn win_available<B: Representation + Default>() -> B {
        drops(&[
            (0, Side::Player),
            (0, Side::Opponent),
            (1, Side::Player),
            (1, Side::Opponent),
            (2, Side::Player),
            (2, Side::Opponent),
        ])
    }

    /// Opponent threatens column 3 on the bottom row; Player has no win
    fn block_needed<B: Representation + Default>() -> B {
        drops(&[
            (6, Side::Player),
            (0, Side::Opponent),
            (6, Side::Player),
            (1, Side::Opponent),
            (5, Side::Player),
            (2, Side::Opponent),
        ])
    }

    #[test]
    fn takes_winning_move_at_every_depth() {
        for depth in 1..=7 {
            let ai = MinimaxArrayAi::with_depth(Side::Player, Difficulty::Easy, depth);
            let report = ai.search_board(&win_available::<ArrayBoard>());
            assert_eq!(report.column, Some(3), "depth {depth}");
            assert_eq!(report.decision, Decision::ImmediateWin);

            let ai = MinimaxGraphAi::with_depth(Side::Player, Difficulty::Easy, depth);
            let report = ai.search_board(&win_available::<GraphBoard>());
            assert_eq!(report.column, Some(3), "depth {depth}");
        }
    }

    #[test]
    fn blocks_opponent_win() {
        let ai = MinimaxArrayAi::new(Side::Player, Difficulty::Medium);
        let report = ai.search_board(&block_needed::<ArrayBoard>());
        assert_eq!(report.column, Some(3));
        assert_eq!(report.decision, Decision::Block);

        let ai = MinimaxGraphAi::new(Side::Player, Difficulty::Medium);
        let report = ai.search_board(&block_needed::<GraphBoard>());
        assert_eq!(report.column, Some(3));
        assert_eq!(report.decision, Decision::Block);
    }

    #[test]
    fn opponent_side_takes_its_own_win() {
        let board: ArrayBoard = block_needed();
        let ai = MinimaxArrayAi::new(Side::Opponent, Difficulty::Easy);
        let report = ai.search_board(&board);
        assert_eq!(report.column, Some(3));
        assert_eq!(report.decision, Decision::ImmediateWin);
    }

    #[test]
    fn search_scores_every_legal_column() {
        let mut board = ArrayBoard::new();
        board.apply_move(3, Side::Player).unwrap();
        board.apply_move(3, Side::Opponent).unwrap();

        let ai = MinimaxArrayAi::new(Side::Player, Difficulty::Easy);
        let report = ai.search_board(&board);
        assert_eq!(report.decision, Decision::Search);
        let columns: Vec<usize> = report.scores.iter().map(|s| s.column).collect();
        assert_eq!(columns, vec![0, 1, 2, 3, 4, 5, 6]);

        let best = report.column.unwrap();
        let best_score = report.score_of(best).unwrap();
        // Chosen column holds the maximum, and no lower column ties it
        assert!(report.scores.iter().all(|s| s.score <= best_score));
        assert!(report
            .scores
            .iter()
            .filter(|s| s.column < best)
            .all(|s| s.score < best_score));
    }

    #[test]
    fn deterministic_for_same_board() {
        let board: GraphBoard = drops(&[(3, Side::Player), (2, Side::Opponent), (4, Side::Player)]);
        let ai = MinimaxGraphAi::new(Side::Opponent, Difficulty::Easy);
        let first = ai.search_board(&board);
        for _ in 0..3 {
            assert_eq!(ai.search_board(&board), first);
        }
    }

    #[test]
    fn prunes_on_open_board() {
        let ai = MinimaxArrayAi::new(Side::Player, Difficulty::Medium);
        let report = ai.search_board(&ArrayBoard::new());
        assert!(report.pruned > 0);
        assert_eq!(report.rollouts, 0);
    }

    #[test]
    fn no_move_on_full_board() {
        let grid = parse_grid(
            "
            XXXOXXX
            XXXOXXX
            OOOXOOO
            OOOXOOO
            XXXOXXX
            XXXOXXX
            ",
        )
        .unwrap();
        let ai = MinimaxArrayAi::new(Side::Player, Difficulty::Hard);
        let report = ai.search_board(&ArrayBoard::from_grid(grid));
        assert_eq!(report, SearchReport::no_move());
    }

    #[test]
    fn search_leaves_board_untouched() {
        let board: ArrayBoard = drops(&[(3, Side::Player), (3, Side::Opponent)]);
        let before = board;
        let ai = MinimaxArrayAi::new(Side::Player, Difficulty::Easy);
        ai.search_board(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn rejects_other_representation() {
        let mut ai = MinimaxArrayAi::new(Side::Player, Difficulty::Easy);
        let err = ai.search(&AnyBoard::new(BoardKind::Graph)).unwrap_err();
        assert_eq!(
            err,
            EngineError::BoardMismatch {
                strategy: "Minimax Array",
                expected: BoardKind::Array,
                found: BoardKind::Graph,
            }
        );
    }

    #[test]
    fn strategy_metadata() {
        let ai = MinimaxGraphAi::new(Side::Opponent, Difficulty::Hard);
        assert_eq!(ai.name(), "Minimax Graph");
        assert_eq!(ai.kind(), StrategyKind::MinimaxGraph);
        assert_eq!(ai.board_kind(), BoardKind::Graph);
        assert_eq!(ai.depth(), 7);
        assert_eq!(MinimaxArrayAi::with_depth(Side::Player, Difficulty::Easy, 0).depth(), 1);
    }
}
