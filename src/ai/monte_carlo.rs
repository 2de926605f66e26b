use std::marker::PhantomData;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::game::{AnyBoard, ArrayBoard, BoardKind, GraphBoard, Representation, Side};

use super::factory::StrategyKind;
use super::strategy::{mismatch, screen_immediate, Decision, Difficulty, MoveScore, SearchReport, Strategy};

/// Reward of a rollout that ends without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenReward {
    /// Flat 0.0
    Draw,
    /// `(heuristic(self) - heuristic(opponent)) / 100.0` on the final position,
    /// taken without the terminal override so a drawn board still scores
    EvalDelta,
}

/// Flat Monte Carlo: every legal column gets an equal share of the rollout
/// budget, and the column with the best average reward is played.
///
/// The array variant runs rollouts straight away and scores open endings as
/// draws. The graph variant first takes or blocks an immediate win and scores
/// open endings with the evaluator.
pub struct MonteCarloAi<B> {
    side: Side,
    difficulty: Difficulty,
    budget: usize,
    screen_threats: bool,
    open_reward: OpenReward,
    rng: StdRng,
    _board: PhantomData<fn() -> B>,
}

pub type MonteCarloArrayAi = MonteCarloAi<ArrayBoard>;
pub type MonteCarloGraphAi = MonteCarloAi<GraphBoard>;

impl<B: Representation> MonteCarloAi<B> {
    pub fn new(side: Side, difficulty: Difficulty) -> Self {
        let graph = B::KIND == BoardKind::Graph;
        MonteCarloAi {
            side,
            difficulty,
            budget: difficulty.simulation_budget(),
            screen_threats: graph,
            open_reward: if graph {
                OpenReward::EvalDelta
            } else {
                OpenReward::Draw
            },
            rng: StdRng::from_os_rng(),
            _board: PhantomData,
        }
    }

    /// Reproducible rollouts
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Override the tier's total rollout budget
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn open_reward(&self) -> OpenReward {
        self.open_reward
    }

    fn label() -> &'static str {
        match B::KIND {
            BoardKind::Array => "Monte Carlo Array",
            BoardKind::Graph => "Monte Carlo Graph",
        }
    }

    /// Decide a move on a board of this strategy's own representation.
    pub fn search_board(&mut self, board: &B) -> SearchReport {
        let legal = board.available_columns();
        if legal.is_empty() {
            return SearchReport::no_move();
        }
        debug!(
            strategy = Self::label(),
            side = self.side.name(),
            budget = self.budget,
            ?legal,
            "starting rollouts"
        );

        if self.screen_threats {
            if let Some((col, decision)) = screen_immediate(board, self.side, &legal) {
                debug!(strategy = Self::label(), col, ?decision, "short-circuit");
                return SearchReport::short_circuit(col, decision);
            }
        }

        // Remainder rollouts are dropped
        let per_move = self.budget / legal.len();
        let mut scores = Vec::with_capacity(legal.len());
        let mut rollouts = 0u64;
        let mut best: Option<(usize, f64)> = None;

        for &col in &legal {
            let Ok(start) = board.play(col, self.side) else {
                continue;
            };

            let mut total = 0.0;
            for _ in 0..per_move {
                total += self.rollout(&start);
                rollouts += 1;
            }
            let average = if per_move == 0 {
                0.0
            } else {
                total / per_move as f64
            };
            debug!(
                strategy = Self::label(),
                col,
                average,
                total,
                per_move,
                "move simulated"
            );
            scores.push(MoveScore {
                column: col,
                score: average,
            });

            // First column to reach the maximum keeps it
            if best.map_or(true, |(_, best_avg)| average > best_avg) {
                best = Some((col, average));
            }
        }

        let Some((column, average)) = best else {
            return SearchReport::no_move();
        };
        info!(
            strategy = Self::label(),
            column,
            average,
            rollouts,
            "best move"
        );

        SearchReport {
            column: Some(column),
            decision: Decision::Search,
            scores,
            pruned: 0,
            rollouts,
        }
    }

    /// Play uniformly random moves from `start` (opponent to move) until the
    /// game ends. +1.0 if this side wins, -1.0 if the opponent does.
    fn rollout(&mut self, start: &B) -> f64 {
        let mut board = start.clone();
        if let Some(winner) = board.winner() {
            return self.reward(winner);
        }

        let mut mover = self.side.other();
        while !board.is_full() {
            let legal = board.available_columns();
            if legal.is_empty() {
                break;
            }
            let col = legal[self.rng.random_range(0..legal.len())];
            if board.apply_move(col, mover).is_err() {
                break;
            }
            if board.has_winner() {
                return self.reward(mover);
            }
            mover = mover.other();
        }

        match self.open_reward {
            OpenReward::Draw => 0.0,
            OpenReward::EvalDelta => {
                let own = board.heuristic(self.side);
                let opp = board.heuristic(self.side.other());
                f64::from(own - opp) / 100.0
            }
        }
    }

    fn reward(&self, winner: Side) -> f64 {
        if winner == self.side {
            1.0
        } else {
            -1.0
        }
    }
}

impl<B: Representation> Strategy for MonteCarloAi<B> {
    fn name(&self) -> &str {
        Self::label()
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::monte_carlo(B::KIND)
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
