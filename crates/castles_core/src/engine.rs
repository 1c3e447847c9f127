//! The simulation engine.
//!
//! One [`Engine`] exclusively owns all mutable game state - the grid, both
//! gold accounts, the tick counter, the enemy builder, and the PRNG. The
//! outside world drives it through exactly two mutating operations:
//!
//! 1. [`Engine::tick`] - one discrete economy step, fired by an external
//!    timer collaborator on whatever cadence it likes.
//! 2. [`Engine::request_build`] - a build command, fired by an external
//!    input collaborator.
//!
//! Both are synchronous, non-blocking state transitions; render layers read
//! the results through [`Engine::snapshot`] and the query accessors, never
//! through mutable access.
//!
//! # Determinism
//!
//! Same config (including seed), same command sequence, same state - byte
//! for byte. All randomness flows through the engine's seeded [`GameRng`],
//! and every grid traversal that feeds a decision is sorted first.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::ai::EnemyBuilder;
use crate::board::generate_board;
use crate::build::{cost_of, validate_site};
use crate::config::EngineConfig;
use crate::control::{control_at, CellControl};
use crate::economy::{accrual, GoldAccount};
use crate::error::{BuildError, Result};
use crate::factions::Faction;
use crate::grid::{BarracksKind, Grid, GridObject, ObjectKind, Position};
use crate::rng::GameRng;

/// A committed build: what was placed, where, and what it cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReceipt {
    /// Faction that built.
    pub faction: Faction,
    /// Kind that was placed.
    pub kind: BarracksKind,
    /// Cell it was placed on.
    pub position: Position,
    /// Gold deducted.
    pub cost: u32,
    /// Balance left after the deduction.
    pub balance_after: u32,
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvents {
    /// Gold the player gained this tick.
    pub player_income: u32,
    /// Gold the enemy gained this tick.
    pub enemy_income: u32,
    /// The enemy build committed this tick, if any.
    pub enemy_build: Option<BuildReceipt>,
}

/// Read-only copy of the observable game state.
///
/// Handed to render and analysis collaborators after every mutation;
/// objects are sorted by position so output is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks elapsed.
    pub tick: u64,
    /// Player gold balance.
    pub player_gold: u32,
    /// Enemy gold balance.
    pub enemy_gold: u32,
    /// Every object on the board, sorted by position.
    pub objects: Vec<GridObject>,
}

/// The core game engine.
///
/// Constructed once per game session, mutated in place by ticks and build
/// requests, discarded at the end. No persistence.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    tick: u64,
    grid: Grid,
    player_gold: GoldAccount,
    enemy_gold: GoldAccount,
    enemy_builder: EnemyBuilder,
    rng: GameRng,
}

impl Engine {
    /// Create an engine with a freshly generated board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GameError::InvalidConfig`] if the
    /// configuration fails validation; board generation itself cannot fail.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = GameRng::new(config.seed);
        let grid = generate_board(&config, &mut rng);
        Ok(Self {
            player_gold: GoldAccount::new(config.player.starting_gold),
            enemy_gold: GoldAccount::new(config.enemy.starting_gold),
            config,
            tick: 0,
            grid,
            enemy_builder: EnemyBuilder::new(),
            rng,
        })
    }

    /// The configuration this engine runs with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ticks elapsed since construction.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Read access to the grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// A faction's gold balance.
    #[must_use]
    pub const fn gold(&self, faction: Faction) -> u32 {
        match faction {
            Faction::Player => self.player_gold.balance(),
            Faction::Enemy => self.enemy_gold.balance(),
        }
    }

    /// Control status of one cell.
    #[must_use]
    pub fn control_at(&self, position: Position) -> CellControl {
        control_at(&self.grid, &self.config, position)
    }

    /// Advance the simulation by one tick.
    ///
    /// Order within a tick:
    /// 1. Economy accrual for both factions (never touches the grid).
    /// 2. Enemy builder evaluation - gold just changed, so the policy's
    ///    trigger condition is re-checked exactly here.
    /// 3. Tick counter increment.
    pub fn tick(&mut self) -> TickEvents {
        let player_income = accrual(&self.grid, &self.config.player, Faction::Player);
        let enemy_income = accrual(&self.grid, &self.config.enemy, Faction::Enemy);
        self.player_gold.earn(player_income);
        self.enemy_gold.earn(enemy_income);

        let enemy_build = self.run_enemy_builder();

        self.tick += 1;

        #[cfg(debug_assertions)]
        {
            let hash = self.state_hash();
            tracing::debug!(tick = self.tick, state_hash = hash, "engine state hash");
        }

        TickEvents {
            player_income,
            enemy_income,
            enemy_build,
        }
    }

    /// Evaluate the enemy policy and commit its plan, if it produced one.
    fn run_enemy_builder(&mut self) -> Option<BuildReceipt> {
        let plan = self.enemy_builder.evaluate(
            &self.grid,
            &self.config,
            &self.enemy_gold,
            &mut self.rng,
        )?;

        // The plan came from the live grid and balance, so committing it
        // through the same path as player builds cannot fail.
        match self.request_build(Faction::Enemy, plan.position, plan.kind) {
            Ok(receipt) => Some(receipt),
            Err(err) => {
                debug_assert!(false, "enemy plan was rejected: {err}");
                None
            }
        }
    }

    /// Request a barracks build.
    ///
    /// Validation order: bounds, occupancy, control, affordability. The
    /// operation is atomic - any rejection leaves the state byte-for-byte
    /// unchanged.
    ///
    /// # Errors
    ///
    /// One of the recoverable [`BuildError`] outcomes; callers branch and
    /// retry, nothing is fatal.
    pub fn request_build(
        &mut self,
        faction: Faction,
        position: Position,
        kind: BarracksKind,
    ) -> std::result::Result<BuildReceipt, BuildError> {
        validate_site(&self.grid, &self.config, faction, position)?;

        let cost = cost_of(&self.grid, self.config.tuning(faction), faction, kind);
        let account = match faction {
            Faction::Player => &mut self.player_gold,
            Faction::Enemy => &mut self.enemy_gold,
        };
        if !account.can_afford(cost) {
            return Err(BuildError::InsufficientGold {
                required: cost,
                available: account.balance(),
            });
        }

        // All checks passed; apply both halves of the transaction.
        let spent = account.spend(cost);
        debug_assert!(spent);
        let placed = self.grid.place(position, ObjectKind::Barracks(faction, kind));
        debug_assert!(placed, "validated site must accept placement");

        let receipt = BuildReceipt {
            faction,
            kind,
            position,
            cost,
            balance_after: self.gold(faction),
        };
        tracing::debug!(
            faction = %faction,
            ?kind,
            x = position.x,
            y = position.y,
            cost,
            "barracks built"
        );
        Ok(receipt)
    }

    /// Produce a read-only snapshot for render and analysis collaborators.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            player_gold: self.player_gold.balance(),
            enemy_gold: self.enemy_gold.balance(),
            objects: self.grid.sorted_objects(),
        }
    }

    /// Deterministic hash of the full engine state.
    ///
    /// Two engines that ran the same config and command sequence produce
    /// identical hashes; used by the determinism test harness.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.tick.hash(&mut hasher);
        self.player_gold.balance().hash(&mut hasher);
        self.enemy_gold.balance().hash(&mut hasher);
        self.rng.state().hash(&mut hasher);

        let objects = self.grid.sorted_objects();
        objects.len().hash(&mut hasher);
        for obj in objects {
            obj.position.hash(&mut hasher);
            obj.kind.hash(&mut hasher);
        }

        hasher.finish()
    }
}
