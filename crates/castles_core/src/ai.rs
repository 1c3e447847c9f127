//! The enemy autonomous builder policy.
//!
//! A two-state machine: `Idle` while waiting for affordability, `Building`
//! while committing a placement. It re-evaluates whenever enemy gold
//! changes, which in practice means once per tick right after accrual.
//!
//! The policy plans but never mutates: it picks a kind and a site and hands
//! the plan back to the engine, which funnels all state changes through one
//! place.

use crate::build::{candidate_sites, cost_of};
use crate::config::EngineConfig;
use crate::economy::GoldAccount;
use crate::factions::Faction;
use crate::grid::{BarracksKind, Grid, Position};
use crate::rng::GameRng;

/// Phase of the enemy builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuilderState {
    /// Waiting until a barracks becomes affordable.
    #[default]
    Idle,
    /// Committing a placement this evaluation.
    Building,
}

/// A placement the policy wants the engine to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedBuild {
    /// Chosen barracks kind.
    pub kind: BarracksKind,
    /// Chosen site.
    pub position: Position,
    /// Cost at the time of planning.
    pub cost: u32,
}

/// The enemy's autonomous build policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyBuilder {
    state: BuilderState,
}

impl EnemyBuilder {
    /// Create an idle builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: BuilderState::Idle,
        }
    }

    /// Current phase. Outside an evaluation this is always `Idle`.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        self.state
    }

    /// Evaluate the policy once and return a placement plan, if any.
    ///
    /// Picks a kind 50/50, checks affordability against the escalating cost
    /// of that kind, then chooses uniformly among controlled-and-unoccupied
    /// cells. Any shortfall - gold, sites - is a skip, never an error; the
    /// builder simply stays idle and retries on the next evaluation.
    pub fn evaluate(
        &mut self,
        grid: &Grid,
        config: &EngineConfig,
        gold: &GoldAccount,
        rng: &mut GameRng,
    ) -> Option<PlannedBuild> {
        let kind = if rng.next_bool() {
            BarracksKind::Garrison
        } else {
            BarracksKind::Mine
        };

        let cost = cost_of(grid, config.tuning(Faction::Enemy), Faction::Enemy, kind);
        if !gold.can_afford(cost) {
            self.state = BuilderState::Idle;
            return None;
        }

        self.state = BuilderState::Building;
        let candidates = candidate_sites(grid, config, Faction::Enemy);
        let plan = if candidates.is_empty() {
            tracing::debug!(?kind, cost, "enemy can afford a barracks but has no free site");
            None
        } else {
            let position = candidates[rng.next_index(candidates.len())];
            Some(PlannedBuild {
                kind,
                position,
                cost,
            })
        };

        self.state = BuilderState::Idle;
        plan
    }
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
    fn test_no_plan_when_broke() {
        let (grid, config) = scenario();
        let mut builder = EnemyBuilder::new();
        let mut rng = GameRng::new(1);

        let plan = builder.evaluate(&grid, &config, &GoldAccount::new(0), &mut rng);
        assert!(plan.is_none());
        assert_eq!(builder.state(), BuilderState::Idle);
    }

    #[test]
    fn test_plan_lands_on_controlled_unoccupied_cell() {
        let (grid, config) = scenario();
        let mut builder = EnemyBuilder::new();

        // Rich enough for either kind at base cost.
        let gold = GoldAccount::new(200);
        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            if let Some(plan) = builder.evaluate(&grid, &config, &gold, &mut rng) {
                assert!(plan.position.chebyshev_distance(config.enemy_castle) <= 1);
                assert!(!grid.is_occupied(plan.position));
                assert!(plan.cost <= 200);
            }
        }
    }

    #[test]
    fn test_no_plan_without_free_sites() {
        let (mut grid, config) = scenario();
        for pos in candidate_sites(&grid, &config, Faction::Enemy) {
            grid.place(pos, ObjectKind::Obstacle(ObstacleKind::Stone));
        }

        let mut builder = EnemyBuilder::new();
        let mut rng = GameRng::new(1);
        let plan = builder.evaluate(&grid, &config, &GoldAccount::new(10_000), &mut rng);
        assert!(plan.is_none());
        assert_eq!(builder.state(), BuilderState::Idle);
    }

    #[test]
    fn test_cost_uses_escalation() {
        let (mut grid, config) = scenario();
        grid.place(
            Position::new(11, 6),
            ObjectKind::Barracks(Faction::Enemy, BarracksKind::Garrison),
        );

        let mut builder = EnemyBuilder::new();
        // 250 covers a first mine (180) but not a second garrison (400).
        let gold = GoldAccount::new(250);
        let mut planned_kinds = Vec::new();
        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            if let Some(plan) = builder.evaluate(&grid, &config, &gold, &mut rng) {
                planned_kinds.push(plan.kind);
                assert_eq!(plan.cost, 180);
            }
        }
        assert!(planned_kinds.iter().all(|&k| k == BarracksKind::Mine));
        assert!(!planned_kinds.is_empty());
    }
}
