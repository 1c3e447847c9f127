//! # Castles Headless
//!
//! Runs the simulation without any presentation layer: a scheduler drives
//! [`castles_core::engine::Engine::tick`] for a fixed number of ticks,
//! optional scripted player strategies stand in for human input, and
//! observable state streams out as JSON lines for external analysis.
//!
//! Used for CI verification, determinism checks, and batch tuning
//! experiments over many seeds.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod runner;
pub mod strategies;

pub use runner::{run_game, GameReport, HeadlessError, RunConfig};
