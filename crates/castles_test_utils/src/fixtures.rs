//! Test fixtures and helpers.
//!
//! Pre-built configurations and engines for consistent testing.

use castles_core::config::{EngineConfig, FactionTuning, ObstacleRange};
use castles_core::engine::Engine;

/// The literal 15x9 scenario: castles at (2,2)/(12,6), control radius 1,
/// no obstacles, configurable starting gold.
#[must_use]
pub fn scenario_config(player_gold: u32, enemy_gold: u32) -> EngineConfig {
    let defaults = EngineConfig::default();
    EngineConfig {
        obstacle_count: ObstacleRange::exactly(0),
        player: FactionTuning {
            starting_gold: player_gold,
            ..defaults.player
        },
        enemy: FactionTuning {
            starting_gold: enemy_gold,
            ..defaults.enemy
        },
        ..defaults
    }
}

/// An engine on the obstacle-free scenario board.
///
/// # Panics
///
/// Panics if the fixture config fails validation; it never does.
#[must_use]
pub fn scenario_engine(player_gold: u32, enemy_gold: u32) -> Engine {
    Engine::new(scenario_config(player_gold, enemy_gold)).expect("fixture config is valid")
}

/// An engine on the default board (obstacles included) with a given seed.
///
/// # Panics
///
/// Panics if the default config fails validation; it never does.
#[must_use]
pub fn seeded_engine(seed: u64) -> Engine {
    Engine::new(EngineConfig::default().with_seed(seed)).expect("default config is valid")
}
