//! Card Battle Simulator - balance tuning for a one-player-vs-one-monster card game
//!
//! Runs many independent simulated battles between a heuristic card-playing
//! player and a monster with a fixed action cycle, then aggregates win rate,
//! turn counts and remaining health.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod simulation;
pub mod zones;

pub use config::BalanceConfig;
pub use error::{Result, SimError};
pub use simulation::{AggregateStatistics, BattleCount, Simulation};
