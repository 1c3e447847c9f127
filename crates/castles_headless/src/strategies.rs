//! Scripted player strategies.
//!
//! Stand-ins for the human input collaborator, driving the engine through
//! the same public command surface a UI would use. Every rejection from
//! [`castles_core::engine::Engine::request_build`] is a skip, exactly like
//! the enemy policy treats its own shortfalls.

use castles_core::engine::{BuildReceipt, Engine};
use castles_core::factions::Faction;
use castles_core::grid::{BarracksKind, Position};
use castles_core::rng::GameRng;

/// How the scripted player behaves each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlayerStrategy {
    /// Never builds; the enemy expands unopposed.
    #[default]
    Idle,
    /// Mirrors the enemy policy: whenever a randomly chosen kind is
    /// affordable, build it on a random controlled free cell.
    Expand,
}

impl std::fmt::Display for PlayerStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Expand => write!(f, "expand"),
        }
    }
}

impl PlayerStrategy {
    /// Let the strategy act once, after a tick.
    ///
    /// Returns the receipt when a build was committed.
    pub fn act(self, engine: &mut Engine, rng: &mut GameRng) -> Option<BuildReceipt> {
        match self {
            Self::Idle => None,
            Self::Expand => expand(engine, rng),
        }
    }
}

/// Random-expansion policy over the public API only.
fn expand(engine: &mut Engine, rng: &mut GameRng) -> Option<BuildReceipt> {
    let kind = if rng.next_bool() {
        BarracksKind::Garrison
    } else {
        BarracksKind::Mine
    };

    let grid = engine.grid();
    let mut candidates = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let position = Position::new(x, y);
            if !grid.is_occupied(position) && engine.control_at(position).player {
                candidates.push(position);
            }
        }
    }
    if candidates.is_empty() {
        return None;
    }

    let position = candidates[rng.next_index(candidates.len())];
    match engine.request_build(Faction::Player, position, kind) {
        Ok(receipt) => Some(receipt),
        Err(err) => {
            tracing::trace!(%err, "player strategy skipped a build");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castles_core::config::{EngineConfig, ObstacleRange};

    fn engine_with_gold(player_gold: u32) -> Engine {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            obstacle_count: ObstacleRange::exactly(0),
            player: castles_core::config::FactionTuning {
                starting_gold: player_gold,
                ..defaults.player
            },
            ..defaults
        };
        Engine::new(config).unwrap()
    }

    #[test]
    fn test_idle_never_builds() {
        let mut engine = engine_with_gold(10_000);
        let mut rng = GameRng::new(3);
        for _ in 0..20 {
            assert!(PlayerStrategy::Idle.act(&mut engine, &mut rng).is_none());
        }
        assert_eq!(engine.grid().total_barracks(Faction::Player), 0);
    }

    #[test]
    fn test_expand_builds_on_controlled_cells() {
        let mut engine = engine_with_gold(10_000);
        let mut rng = GameRng::new(3);

        let mut built = 0;
        for _ in 0..10 {
            if let Some(receipt) = PlayerStrategy::Expand.act(&mut engine, &mut rng) {
                assert_eq!(receipt.faction, Faction::Player);
                built += 1;
            }
        }
        assert!(built > 0);
        assert_eq!(engine.grid().total_barracks(Faction::Player), built);
    }

    #[test]
    fn test_expand_skips_when_broke() {
        let mut engine = engine_with_gold(0);
        let mut rng = GameRng::new(3);
        for _ in 0..20 {
            assert!(PlayerStrategy::Expand.act(&mut engine, &mut rng).is_none());
        }
        assert_eq!(engine.grid().total_barracks(Faction::Player), 0);
    }
}
