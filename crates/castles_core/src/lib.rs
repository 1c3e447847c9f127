//! # Castles Core
//!
//! Deterministic simulation core for the Castles territorial-control game.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness (seeded PRNG only)
//!
//! This separation enables:
//! - Headless runs and CI verification
//! - Reproducible tuning experiments from a seed
//! - Determinism testing
//!
//! ## Crate Structure
//!
//! - [`grid`] - Positions, object kinds, and the occupancy grid
//! - [`board`] - Starting-board generation
//! - [`control`] - Territorial control evaluation
//! - [`economy`] - Gold accounts and per-tick accrual
//! - [`build`] - Build-site validation and cost scaling
//! - [`ai`] - The enemy autonomous builder policy
//! - [`engine`] - The engine owning all mutable state

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod board;
pub mod build;
pub mod config;
pub mod control;
pub mod economy;
pub mod engine;
pub mod error;
pub mod factions;
pub mod grid;
pub mod rng;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ai::{BuilderState, EnemyBuilder};
    pub use crate::config::{BarracksCosts, EngineConfig, FactionTuning, ObstacleRange};
    pub use crate::control::CellControl;
    pub use crate::economy::GoldAccount;
    pub use crate::engine::{BuildReceipt, Engine, Snapshot, TickEvents};
    pub use crate::error::{BuildError, GameError, Result};
    pub use crate::factions::Faction;
    pub use crate::grid::{BarracksKind, Grid, GridObject, ObjectKind, ObstacleKind, Position};
    pub use crate::rng::GameRng;
}
