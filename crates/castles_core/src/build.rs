//! Build-site validation and cost scaling.
//!
//! Each additional barracks of the same kind costs one more multiple of its
//! base price: the first costs `base`, the second `2 * base`, and so on -
//! linear escalation, not compounding.

use crate::config::{EngineConfig, FactionTuning};
use crate::control::is_controlled_by;
use crate::error::BuildError;
use crate::factions::Faction;
use crate::grid::{BarracksKind, Grid, Position};

/// Cost of the next barracks given how many of that kind already stand.
#[must_use]
pub const fn barracks_cost(base: u32, existing: u32) -> u32 {
    base * (existing + 1)
}

/// Cost of the next barracks of `kind` for `faction` on the current grid.
#[must_use]
pub fn cost_of(grid: &Grid, tuning: &FactionTuning, faction: Faction, kind: BarracksKind) -> u32 {
    barracks_cost(tuning.base_costs.cost_of(kind), grid.barracks_count(faction, kind))
}

/// Check that a cell is a legal build site for `faction`.
///
/// Checks run in a fixed order - bounds, occupancy, control - and the first
/// failure wins. Affordability is the caller's concern; it depends on the
/// chosen kind, not the site.
///
/// # Errors
///
/// [`BuildError::OutOfBounds`], [`BuildError::CellOccupied`], or
/// [`BuildError::CellNotControlled`].
pub fn validate_site(
    grid: &Grid,
    config: &EngineConfig,
    faction: Faction,
    position: Position,
) -> Result<(), BuildError> {
    if !grid.in_bounds(position) {
        return Err(BuildError::OutOfBounds {
            position,
            width: grid.width(),
            height: grid.height(),
        });
    }
    if grid.is_occupied(position) {
        return Err(BuildError::CellOccupied { position });
    }
    if !is_controlled_by(grid, config, faction, position) {
        return Err(BuildError::CellNotControlled { position, faction });
    }
    Ok(())
}

/// All legal build sites for `faction`: controlled and unoccupied cells.
///
/// Enumerates the grid row-major, so the result is deterministic.
#[must_use]
pub fn candidate_sites(grid: &Grid, config: &EngineConfig, faction: Faction) -> Vec<Position> {
    let mut candidates = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let position = Position::new(x, y);
            if !grid.is_occupied(position)
                && is_controlled_by(grid, config, faction, position)
            {
                candidates.push(position);
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObstacleRange;
    use crate::grid::{ObjectKind, ObstacleKind};

    fn scenario() -> (Grid, EngineConfig) {
        let config = EngineConfig {
            obstacle_count: ObstacleRange::exactly(0),
            ..Default::default()
        };
        let mut grid = Grid::new(config.grid_width, config.grid_height);
        grid.place(config.player_castle, ObjectKind::Castle(Faction::Player));
        grid.place(config.enemy_castle, ObjectKind::Castle(Faction::Enemy));
        (grid, config)
    }

    #[test]
    fn test_cost_scales_linearly() {
        assert_eq!(barracks_cost(150, 0), 150);
        assert_eq!(barracks_cost(150, 1), 300);
        assert_eq!(barracks_cost(150, 2), 450);
        assert_eq!(barracks_cost(120, 3), 480);
    }

    #[test]
    fn test_cost_strictly_monotonic() {
        for existing in 0..50 {
            assert!(barracks_cost(120, existing + 1) > barracks_cost(120, existing));
        }
    }

    #[test]
    fn test_cost_of_counts_per_kind_per_faction() {
        let (mut grid, config) = scenario();
        grid.place(
            Position::new(2, 3),
            ObjectKind::Barracks(Faction::Player, BarracksKind::Garrison),
        );

        // A second garrison is pricier; mines still at base.
        assert_eq!(
            cost_of(&grid, &config.player, Faction::Player, BarracksKind::Garrison),
            300
        );
        assert_eq!(
            cost_of(&grid, &config.player, Faction::Player, BarracksKind::Mine),
            120
        );
        // The enemy's own count is independent of the player's.
        assert_eq!(
            cost_of(&grid, &config.enemy, Faction::Enemy, BarracksKind::Garrison),
            200
        );
    }

    #[test]
    fn test_validate_site_check_order() {
        let (mut grid, config) = scenario();

        assert!(matches!(
            validate_site(&grid, &config, Faction::Player, Position::new(-1, 0)),
            Err(BuildError::OutOfBounds { .. })
        ));

        // Occupied wins over uncontrolled: the enemy castle cell is both.
        assert!(matches!(
            validate_site(&grid, &config, Faction::Player, config.enemy_castle),
            Err(BuildError::CellOccupied { .. })
        ));

        // An obstacle inside controlled territory is still occupied.
        grid.place(Position::new(2, 3), ObjectKind::Obstacle(ObstacleKind::Tree));
        assert!(matches!(
            validate_site(&grid, &config, Faction::Player, Position::new(2, 3)),
            Err(BuildError::CellOccupied { .. })
        ));

        assert!(matches!(
            validate_site(&grid, &config, Faction::Player, Position::new(8, 4)),
            Err(BuildError::CellNotControlled { .. })
        ));

        assert!(validate_site(&grid, &config, Faction::Player, Position::new(3, 2)).is_ok());
    }

    #[test]
    fn test_candidate_sites_radius_one() {
        let (grid, config) = scenario();

        // 3x3 neighborhood of the enemy castle minus the castle cell itself.
        let candidates = candidate_sites(&grid, &config, Faction::Enemy);
        assert_eq!(candidates.len(), 8);
        for pos in &candidates {
            assert!(pos.chebyshev_distance(config.enemy_castle) <= 1);
            assert!(!grid.is_occupied(*pos));
        }
    }

    #[test]
    fn test_candidate_sites_shrink_when_occupied() {
        let (mut grid, config) = scenario();
        for pos in candidate_sites(&grid, &config, Faction::Enemy) {
            grid.place(pos, ObjectKind::Obstacle(ObstacleKind::Stone));
        }
        assert!(candidate_sites(&grid, &config, Faction::Enemy).is_empty());
    }
}
