//! Batch runs for balance sweeps.
//!
//! Runs many seeds of the same configuration in parallel with rayon and
//! aggregates the reports, so tuning changes can be judged over a
//! population of boards instead of a single lucky seed.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use castles_core::config::EngineConfig;

use crate::runner::{run_game, GameReport, HeadlessError, RunConfig};
use crate::strategies::PlayerStrategy;

/// Configuration for a batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Number of games to run.
    pub count: u64,
    /// Seed of the first game; game `i` uses `seed_start + i`.
    pub seed_start: u64,
    /// Ticks per game.
    pub ticks: u64,
    /// Scripted player behaviour, shared by every game.
    pub strategy: PlayerStrategy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 100,
            seed_start: 0,
            ticks: 200,
            strategy: PlayerStrategy::Expand,
        }
    }
}

/// Aggregated statistics over one batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Games in the batch.
    pub games: u64,
    /// Ticks per game.
    pub ticks: u64,
    /// Mean final player gold.
    pub mean_player_gold: f64,
    /// Mean final enemy gold.
    pub mean_enemy_gold: f64,
    /// Mean player barracks at the end.
    pub mean_player_barracks: f64,
    /// Mean enemy barracks at the end.
    pub mean_enemy_barracks: f64,
    /// Mean player-controlled cells at the end.
    pub mean_player_territory: f64,
    /// Mean enemy-controlled cells at the end.
    pub mean_enemy_territory: f64,
    /// Mean contested cells at the end.
    pub mean_contested: f64,
}

impl BatchSummary {
    /// Aggregate a set of reports.
    ///
    /// # Panics
    ///
    /// Panics if `reports` is empty; a batch always runs at least one game.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_reports(reports: &[GameReport], ticks: u64) -> Self {
        assert!(!reports.is_empty(), "batch summary needs at least one report");
        let n = reports.len() as f64;
        let mean = |f: fn(&GameReport) -> u32| -> f64 {
            reports.iter().map(|r| f64::from(f(r))).sum::<f64>() / n
        };

        Self {
            games: reports.len() as u64,
            ticks,
            mean_player_gold: mean(|r| r.player.gold),
            mean_enemy_gold: mean(|r| r.enemy.gold),
            mean_player_barracks: mean(|r| r.player.barracks),
            mean_enemy_barracks: mean(|r| r.enemy.barracks),
            mean_player_territory: mean(|r| r.player.territory),
            mean_enemy_territory: mean(|r| r.enemy.territory),
            mean_contested: mean(|r| r.contested),
        }
    }
}

/// Run a batch of games in parallel and aggregate the reports.
///
/// Each game is independent and deterministic in its seed, so the parallel
/// schedule never affects results.
///
/// # Errors
///
/// Returns the first [`HeadlessError`] any game produced.
pub fn run_batch(
    base_config: EngineConfig,
    batch: &BatchConfig,
) -> Result<(Vec<GameReport>, BatchSummary), HeadlessError> {
    info!(
        count = batch.count,
        seed_start = batch.seed_start,
        ticks = batch.ticks,
        "starting batch"
    );

    let run = RunConfig {
        ticks: batch.ticks,
        strategy: batch.strategy,
        emit_snapshots: false,
    };

    let mut reports = (0..batch.count)
        .into_par_iter()
        .map(|i| {
            let config = base_config.with_seed(batch.seed_start + i);
            run_game(config, &run, &mut std::io::sink())
        })
        .collect::<Result<Vec<GameReport>, HeadlessError>>()?;

    // Parallel collection order already matches seed order, but sort anyway
    // so output never depends on the scheduler.
    reports.sort_unstable_by_key(|r| r.seed);

    let summary = BatchSummary::from_reports(&reports, batch.ticks);
    Ok((reports, summary))
}
