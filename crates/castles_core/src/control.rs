//! Territorial control evaluation.
//!
//! A faction controls a cell when the cell lies within its control radius
//! (Chebyshev distance) of the faction's castle or any of its barracks.
//! Contested cells - controlled by both factions at once - are reported as
//! such; the core deliberately bakes in no tie-break, leaving arbitration
//! to callers.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::factions::Faction;
use crate::grid::{Grid, Position};

/// Control status of one cell, one flag per faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellControl {
    /// Within the player's territory.
    pub player: bool,
    /// Within the enemy's territory.
    pub enemy: bool,
}

impl CellControl {
    /// Both factions reach this cell.
    #[must_use]
    pub const fn contested(self) -> bool {
        self.player && self.enemy
    }

    /// Neither faction reaches this cell.
    #[must_use]
    pub const fn neutral(self) -> bool {
        !self.player && !self.enemy
    }

    /// Whether the given faction controls this cell.
    #[must_use]
    pub const fn by(self, faction: Faction) -> bool {
        match faction {
            Faction::Player => self.player,
            Faction::Enemy => self.enemy,
        }
    }
}

/// Effective control radius of a faction.
///
/// Base radius plus the per-barracks increment; the increment defaults to 0
/// in configuration, which keeps the radius flat.
#[must_use]
pub fn faction_radius(grid: &Grid, config: &EngineConfig, faction: Faction) -> i32 {
    config.control_radius + config.control_radius_increment * grid.total_barracks(faction) as i32
}

/// Whether `faction` controls the cell at `position`.
///
/// Out-of-bounds positions are controlled by nobody.
#[must_use]
pub fn is_controlled_by(
    grid: &Grid,
    config: &EngineConfig,
    faction: Faction,
    position: Position,
) -> bool {
    if !grid.in_bounds(position) {
        return false;
    }
    let radius = faction_radius(grid, config, faction);
    grid.control_sources(faction)
        .iter()
        .any(|source| source.chebyshev_distance(position) <= radius)
}

/// Control status of the cell at `position` for both factions.
#[must_use]
pub fn control_at(grid: &Grid, config: &EngineConfig, position: Position) -> CellControl {
    CellControl {
        player: is_controlled_by(grid, config, Faction::Player, position),
        enemy: is_controlled_by(grid, config, Faction::Enemy, position),
    }
}
