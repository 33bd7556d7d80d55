//! Expected time-to-win tables for twelve-tile shut-the-box.
//!
//! Each roll of two dice may close the two tiles showing on the dice (a
//! split) or the one tile equal to their sum. A roll that closes nothing is a
//! bust and the board stays as it is. [`solver::solve`] computes, for all
//! 4096 sets of open tiles, the expected number of rolls until every tile is
//! closed, visiting states by open-tile count so each state's successors are
//! already final. With [`StrategyOptions::optimal_skip`] on, rolls that hurt
//! more than a bust are deliberately passed and recorded in the skip table.

pub mod bot;
pub mod error;
pub mod model;
pub mod prune;
pub mod report;
pub mod rules;
pub mod schedule;
pub mod solver;

pub use error::EngineError;
pub use model::{BoardState, Move, SkipEntry, Solution, StrategyOptions, TimedMove};
pub use solver::solve;
