//! Engine configuration.
//!
//! Everything the surveyed snapshots hard-coded as constants - grid size,
//! control radius, gold rates, base costs, obstacle counts - is supplied
//! here at engine construction. Defaults follow the 15x9 canvas variant;
//! none of the snapshot numbers are treated as canonical.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::factions::Faction;
use crate::grid::{BarracksKind, Position};

/// Base cost of each barracks kind before count scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarracksCosts {
    /// Base cost of a [`BarracksKind::Garrison`].
    pub garrison: u32,
    /// Base cost of a [`BarracksKind::Mine`].
    pub mine: u32,
}

impl BarracksCosts {
    /// Base cost of the given kind.
    #[must_use]
    pub const fn cost_of(&self, kind: BarracksKind) -> u32 {
        match kind {
            BarracksKind::Garrison => self.garrison,
            BarracksKind::Mine => self.mine,
        }
    }
}

/// Inclusive range of obstacles scattered at board creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleRange {
    /// Minimum obstacle count.
    pub min: u32,
    /// Maximum obstacle count.
    pub max: u32,
}

impl ObstacleRange {
    /// A fixed obstacle count (min == max).
    #[must_use]
    pub const fn exactly(count: u32) -> Self {
        Self {
            min: count,
            max: count,
        }
    }
}

/// Per-faction economy tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionTuning {
    /// Gold balance at game start.
    pub starting_gold: u32,
    /// Flat gold gained every tick.
    pub base_gold_per_tick: u32,
    /// Bonus gold per owned mine barracks every tick.
    pub mine_gold_per_tick: u32,
    /// Base build costs before count scaling.
    pub base_costs: BarracksCosts,
}

/// Full engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Board width in cells.
    pub grid_width: i32,
    /// Board height in cells.
    pub grid_height: i32,
    /// Chebyshev control radius around castles and barracks.
    pub control_radius: i32,
    /// Extra radius per owned barracks. The surveyed snapshots carried this
    /// mechanic with the constant set to 0; it stays expressible here.
    pub control_radius_increment: i32,
    /// How many obstacles to scatter at board creation.
    pub obstacle_count: ObstacleRange,
    /// Player castle cell.
    pub player_castle: Position,
    /// Enemy castle cell.
    pub enemy_castle: Position,
    /// Seed for all engine randomness.
    pub seed: u64,
    /// Player economy tuning.
    pub player: FactionTuning,
    /// Enemy economy tuning.
    pub enemy: FactionTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_width: 15,
            grid_height: 9,
            control_radius: 1,
            control_radius_increment: 0,
            obstacle_count: ObstacleRange::exactly(20),
            player_castle: Position::new(2, 2),
            enemy_castle: Position::new(12, 6),
            seed: 0,
            player: FactionTuning {
                starting_gold: 0,
                base_gold_per_tick: 12,
                mine_gold_per_tick: 4,
                base_costs: BarracksCosts {
                    garrison: 150,
                    mine: 120,
                },
            },
            enemy: FactionTuning {
                starting_gold: 0,
                base_gold_per_tick: 9,
                mine_gold_per_tick: 3,
                base_costs: BarracksCosts {
                    garrison: 200,
                    mine: 180,
                },
            },
        }
    }
}

impl EngineConfig {
    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the obstacle count range.
    #[must_use]
    pub const fn with_obstacles(mut self, range: ObstacleRange) -> Self {
        self.obstacle_count = range;
        self
    }

    /// The tuning block for one faction.
    #[must_use]
    pub const fn tuning(&self, faction: Faction) -> &FactionTuning {
        match faction {
            Faction::Player => &self.player,
            Faction::Enemy => &self.enemy,
        }
    }

    /// The configured castle cell for one faction.
    #[must_use]
    pub const fn castle(&self, faction: Faction) -> Position {
        match faction {
            Faction::Player => self.player_castle,
            Faction::Enemy => self.enemy_castle,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] for non-positive grid
    /// dimensions, castles out of bounds or overlapping, an inverted
    /// obstacle range, or a negative radius.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.control_radius < 0 || self.control_radius_increment < 0 {
            return Err(GameError::InvalidConfig(format!(
                "control radius must be non-negative, got {} (+{} per barracks)",
                self.control_radius, self.control_radius_increment
            )));
        }
        for faction in Faction::ALL {
            let castle = self.castle(faction);
            let inside = castle.x >= 0
                && castle.x < self.grid_width
                && castle.y >= 0
                && castle.y < self.grid_height;
            if !inside {
                return Err(GameError::InvalidConfig(format!(
                    "{faction} castle ({}, {}) is outside the {}x{} grid",
                    castle.x, castle.y, self.grid_width, self.grid_height
                )));
            }
        }
        if self.player_castle == self.enemy_castle {
            return Err(GameError::InvalidConfig(
                "castles cannot share a cell".to_string(),
            ));
        }
        if self.obstacle_count.min > self.obstacle_count.max {
            return Err(GameError::InvalidConfig(format!(
                "obstacle range is inverted: {}..={}",
                self.obstacle_count.min, self.obstacle_count.max
            )));
        }
        Ok(())
    }
}
