//! Starting-board generation.
//!
//! Places both castles at their configured near-corner cells, then scatters
//! a random number of obstacles by rejection sampling: draw uniformly
//! random cells until the target count lands on empty ones. The grid is far
//! larger than the obstacle count in every sane configuration, so sampling
//! terminates quickly; a retry bound still guards against pathological
//! configs.

use crate::config::EngineConfig;
use crate::factions::Faction;
use crate::grid::{Grid, ObjectKind, ObstacleKind, Position};
use crate::rng::GameRng;

/// Upper bound on rejection-sampling draws per board.
///
/// Only reachable when the obstacle range nearly fills the grid; normal
/// configurations use a tiny fraction of this.
const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Build a starting board: two castles plus scattered obstacles.
///
/// The caller is expected to have validated `config` already; castle
/// placement cannot fail on a validated config. If the retry bound is
/// exhausted the board keeps the obstacles that fit and a warning is
/// logged - board creation itself never fails.
#[must_use]
pub fn generate_board(config: &EngineConfig, rng: &mut GameRng) -> Grid {
    let mut grid = Grid::new(config.grid_width, config.grid_height);

    for faction in Faction::ALL {
        let placed = grid.place(config.castle(faction), ObjectKind::Castle(faction));
        debug_assert!(placed, "castle placement must succeed on a validated config");
    }

    scatter_obstacles(config, &mut grid, rng);
    grid
}

/// Rejection-sample obstacle positions onto empty cells.
///
/// Castle cells are excluded implicitly: they are occupied by the time
/// sampling starts.
fn scatter_obstacles(config: &EngineConfig, grid: &mut Grid, rng: &mut GameRng) {
    let target = rng.next_range(
        config.obstacle_count.min as i32,
        config.obstacle_count.max as i32,
    ) as u32;

    let mut placed = 0;
    let mut attempts = 0;
    while placed < target && attempts < MAX_PLACEMENT_ATTEMPTS {
        attempts += 1;
        let position = Position::new(
            rng.next_range(0, config.grid_width - 1),
            rng.next_range(0, config.grid_height - 1),
        );
        if grid.is_occupied(position) {
            continue;
        }
        let kind = if rng.next_bool() {
            ObstacleKind::Stone
        } else {
            ObstacleKind::Tree
        };
        grid.place(position, ObjectKind::Obstacle(kind));
        placed += 1;
    }

    if placed < target {
        tracing::warn!(
            placed,
            target,
            attempts,
            "obstacle scatter hit the retry bound; continuing with a sparser board"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObstacleRange;

    #[test]
    fn test_castles_at_configured_cells() {
        let config = EngineConfig::default();
        let mut rng = GameRng::new(config.seed);
        let grid = generate_board(&config, &mut rng);

        assert_eq!(
            grid.object_at(Position::new(2, 2)),
            Some(ObjectKind::Castle(Faction::Player))
        );
        assert_eq!(
            grid.object_at(Position::new(12, 6)),
            Some(ObjectKind::Castle(Faction::Enemy))
        );
    }

    #[test]
    fn test_obstacle_count_within_range() {
        let config = EngineConfig::default().with_obstacles(ObstacleRange { min: 5, max: 12 });
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let grid = generate_board(&config, &mut rng);
            let obstacles = grid
                .iter()
                .filter(|(_, kind)| matches!(kind, ObjectKind::Obstacle(_)))
                .count();
            assert!((5..=12).contains(&obstacles), "got {obstacles} obstacles");
            // Two castles plus the obstacles, nothing else.
            assert_eq!(grid.len(), obstacles + 2);
        }
    }

    #[test]
    fn test_obstacles_never_displace_castles() {
        // Dense scatter on a small board stresses the rejection path.
        let config = EngineConfig {
            grid_width: 5,
            grid_height: 5,
            player_castle: Position::new(0, 0),
            enemy_castle: Position::new(4, 4),
            obstacle_count: ObstacleRange::exactly(20),
            ..Default::default()
        };
        let mut rng = GameRng::new(3);
        let grid = generate_board(&config, &mut rng);

        assert_eq!(
            grid.object_at(Position::new(0, 0)),
            Some(ObjectKind::Castle(Faction::Player))
        );
        assert_eq!(
            grid.object_at(Position::new(4, 4)),
            Some(ObjectKind::Castle(Faction::Enemy))
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = EngineConfig::default().with_seed(42);
        let mut rng_a = GameRng::new(config.seed);
        let mut rng_b = GameRng::new(config.seed);

        let a = generate_board(&config, &mut rng_a);
        let b = generate_board(&config, &mut rng_b);
        assert_eq!(a.sorted_objects(), b.sorted_objects());
    }

    #[test]
    fn test_retry_bound_leaves_partial_board() {
        // 2x2 board with two castles leaves two free cells; asking for 20
        // obstacles must stop at the bound instead of spinning forever.
        let config = EngineConfig {
            grid_width: 2,
            grid_height: 2,
            player_castle: Position::new(0, 0),
            enemy_castle: Position::new(1, 1),
            obstacle_count: ObstacleRange::exactly(20),
            ..Default::default()
        };
        let mut rng = GameRng::new(0);
        let grid = generate_board(&config, &mut rng);
        assert!(grid.len() <= 4);
    }
}
