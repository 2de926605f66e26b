//! # Connect Four engine
//!
//! Move-selection engine for Connect Four. Two interchangeable board
//! representations share one static evaluator, and four strategies
//! (minimax and Monte Carlo, each bound to one representation) pick moves.
//!
//! ## Modules
//!
//! - [`game`] — Board capability set, array and graph boards, evaluator, sessions
//! - [`ai`] — Strategy trait, minimax, Monte Carlo, strategy factory
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
