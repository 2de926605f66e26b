use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::game::{BoardKind, Side};

use super::minimax::{MinimaxArrayAi, MinimaxGraphAi};
use super::monte_carlo::{MonteCarloArrayAi, MonteCarloGraphAi};
use super::strategy::{Difficulty, Strategy};

/// The closed set of strategies the engine can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    MinimaxArray,
    MinimaxGraph,
    MonteCarloArray,
    MonteCarloGraph,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::MinimaxArray,
        StrategyKind::MinimaxGraph,
        StrategyKind::MonteCarloArray,
        StrategyKind::MonteCarloGraph,
    ];

    pub fn minimax(board: BoardKind) -> Self {
        match board {
            BoardKind::Array => StrategyKind::MinimaxArray,
            BoardKind::Graph => StrategyKind::MinimaxGraph,
        }
    }

    pub fn monte_carlo(board: BoardKind) -> Self {
        match board {
            BoardKind::Array => StrategyKind::MonteCarloArray,
            BoardKind::Graph => StrategyKind::MonteCarloGraph,
        }
    }

    /// Board representation the strategy must be handed
    pub fn board_kind(self) -> BoardKind {
        match self {
            StrategyKind::MinimaxArray | StrategyKind::MonteCarloArray => BoardKind::Array,
            StrategyKind::MinimaxGraph | StrategyKind::MonteCarloGraph => BoardKind::Graph,
        }
    }

    /// Command-line identifier
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::MinimaxArray => "minimax-array",
            StrategyKind::MinimaxGraph => "minimax-graph",
            StrategyKind::MonteCarloArray => "monte-carlo-array",
            StrategyKind::MonteCarloGraph => "monte-carlo-graph",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::MinimaxArray => {
                "Minimax with alpha-beta pruning on the array representation"
            }
            StrategyKind::MinimaxGraph => {
                "Minimax with connectivity-aware evaluation on the graph representation"
            }
            StrategyKind::MonteCarloArray => {
                "Monte Carlo random rollouts on the array representation"
            }
            StrategyKind::MonteCarloGraph => {
                "Monte Carlo rollouts with threat screening on the graph representation"
            }
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| EngineError::UnknownStrategy(s.to_string()))
    }
}

/// Builds strategies with the depths, budgets and seed of an [`EngineConfig`].
#[derive(Debug, Clone, Default)]
pub struct StrategyFactory {
    config: EngineConfig,
}

impl StrategyFactory {
    pub fn new(config: EngineConfig) -> Self {
        StrategyFactory { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn create(&self, kind: StrategyKind, side: Side, difficulty: Difficulty) -> Box<dyn Strategy> {
        let depth = self.config.minimax.depth(difficulty);
        let budget = self.config.monte_carlo.budget(difficulty);
        debug!(%kind, side = side.name(), %difficulty, depth, budget, "creating strategy");

        match kind {
            StrategyKind::MinimaxArray => {
                Box::new(MinimaxArrayAi::with_depth(side, difficulty, depth))
            }
            StrategyKind::MinimaxGraph => {
                Box::new(MinimaxGraphAi::with_depth(side, difficulty, depth))
            }
            StrategyKind::MonteCarloArray => {
                let ai = MonteCarloArrayAi::new(side, difficulty).with_budget(budget);
                Box::new(match self.config.seed {
                    Some(seed) => ai.with_seed(seed),
                    None => ai,
                })
            }
            StrategyKind::MonteCarloGraph => {
                let ai = MonteCarloGraphAi::new(side, difficulty).with_budget(budget);
                Box::new(match self.config.seed {
                    Some(seed) => ai.with_seed(seed),
                    None => ai,
                })
            }
        }
    }

    /// Build from textual identifiers, e.g. `("monte-carlo-graph", .., "hard")`
    pub fn create_named(
        &self,
        kind: &str,
        side: Side,
        difficulty: &str,
    ) -> Result<Box<dyn Strategy>, EngineError> {
        let kind: StrategyKind = kind.parse()?;
        let difficulty: Difficulty = difficulty.parse()?;
        Ok(self.create(kind, side, difficulty))
    }
}

/// Build a strategy with the fixed difficulty tiers
pub fn create_strategy(kind: StrategyKind, side: Side, difficulty: Difficulty) -> Box<dyn Strategy> {
    StrategyFactory::default().create(kind, side, difficulty)
}
