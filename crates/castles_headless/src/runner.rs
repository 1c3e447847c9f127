//! Single-game execution.
//!
//! Drives one [`Engine`] for a fixed number of ticks, optionally letting a
//! scripted [`PlayerStrategy`] act after each tick, and collects a
//! [`GameReport`] at the end. Snapshot output goes to the given writer as
//! JSON, one line per tick, so runs can be piped and diffed.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use castles_core::config::EngineConfig;
use castles_core::engine::Engine;
use castles_core::error::GameError;
use castles_core::factions::Faction;
use castles_core::grid::Position;
use castles_core::rng::GameRng;

use crate::strategies::PlayerStrategy;

/// Errors surfaced by the headless runner.
#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    /// The engine rejected its configuration.
    #[error("engine error: {0}")]
    Game(#[from] GameError),
    /// Snapshot or report output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A configuration file failed to parse.
    #[error("config file error: {0}")]
    ConfigFile(#[from] ron::error::SpannedError),
}

/// Configuration for a single run.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// How many ticks to simulate.
    pub ticks: u64,
    /// Scripted player behaviour.
    pub strategy: PlayerStrategy,
    /// Emit a JSON snapshot line after every tick.
    pub emit_snapshots: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 100,
            strategy: PlayerStrategy::Idle,
            emit_snapshots: false,
        }
    }
}

/// Per-faction totals in a [`GameReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionReport {
    /// Final gold balance.
    pub gold: u32,
    /// Barracks standing at the end, either kind.
    pub barracks: u32,
    /// Cells under this faction's control (contested cells count for both).
    pub territory: u32,
}

/// Summary of one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    /// Seed the engine ran with.
    pub seed: u64,
    /// Ticks simulated.
    pub ticks: u64,
    /// Player totals.
    pub player: FactionReport,
    /// Enemy totals.
    pub enemy: FactionReport,
    /// Cells claimed by both factions at once.
    pub contested: u32,
    /// Final engine state hash, for determinism checks across runs.
    pub state_hash: u64,
}

/// Run one game to completion.
///
/// The player strategy draws from its own seeded generator (derived from
/// the engine seed) so strategy randomness never perturbs engine
/// randomness.
///
/// # Errors
///
/// Returns [`HeadlessError::Game`] for an invalid configuration and
/// [`HeadlessError::Io`] / [`HeadlessError::Serialize`] when snapshot
/// output fails.
pub fn run_game(
    config: EngineConfig,
    run: &RunConfig,
    out: &mut impl Write,
) -> Result<GameReport, HeadlessError> {
    let mut engine = Engine::new(config)?;
    let mut strategy_rng = GameRng::new(config.seed ^ 0xA5A5_A5A5_A5A5_A5A5);

    debug!(seed = config.seed, ticks = run.ticks, "starting run");

    for _ in 0..run.ticks {
        engine.tick();
        run.strategy.act(&mut engine, &mut strategy_rng);

        if run.emit_snapshots {
            serde_json::to_writer(&mut *out, &engine.snapshot())?;
            writeln!(out)?;
        }
    }

    let report = report_for(&engine, run.ticks);
    info!(
        seed = report.seed,
        player_gold = report.player.gold,
        enemy_gold = report.enemy.gold,
        enemy_barracks = report.enemy.barracks,
        "run finished"
    );
    Ok(report)
}

/// Build the final report by scanning the full board once.
fn report_for(engine: &Engine, ticks: u64) -> GameReport {
    let grid = engine.grid();
    let mut player_territory = 0;
    let mut enemy_territory = 0;
    let mut contested = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let control = engine.control_at(Position::new(x, y));
            if control.player {
                player_territory += 1;
            }
            if control.enemy {
                enemy_territory += 1;
            }
            if control.contested() {
                contested += 1;
            }
        }
    }

    GameReport {
        seed: engine.config().seed,
        ticks,
        player: FactionReport {
            gold: engine.gold(Faction::Player),
            barracks: grid.total_barracks(Faction::Player),
            territory: player_territory,
        },
        enemy: FactionReport {
            gold: engine.gold(Faction::Enemy),
            barracks: grid.total_barracks(Faction::Enemy),
            territory: enemy_territory,
        },
        contested,
        state_hash: engine.state_hash(),
    }
}
