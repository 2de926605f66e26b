mod factory;
mod minimax;
mod monte_carlo;
mod strategy;

pub use factory::{create_strategy, StrategyFactory, StrategyKind};
pub use minimax::{MinimaxAi, MinimaxArrayAi, MinimaxGraphAi};
pub use monte_carlo::{MonteCarloAi, MonteCarloArrayAi, MonteCarloGraphAi, OpenReward};
pub use strategy::{Decision, Difficulty, MoveScore, SearchReport, Strategy};
