//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the simulation produces identical
//! results given identical inputs.
//!
//! # Testing Strategy
//!
//! Sources of non-determinism the engine must avoid:
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Every grid traversal that feeds a decision is sorted first.
//!
//! - **System randomness**: no ambient `rand()`. All "random" behavior
//!   flows through one seeded [`castles_core::rng::GameRng`].
//!
//! The harness runs the same configuration several times (sequentially and
//! across threads) and compares final state hashes.

use std::thread;

use castles_core::config::EngineConfig;
use castles_core::engine::Engine;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Final state hash from each run.
    pub hashes: Vec<u64>,
    /// Number of ticks simulated.
    pub ticks: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic simulation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the simulation was deterministic, with a detailed
    /// error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Simulation is non-deterministic!\n\
                 Runs: {}\n\
                 Ticks: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.ticks,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run one engine to completion and return its final hash.
fn run_once(config: EngineConfig, ticks: u64) -> u64 {
    let mut engine = Engine::new(config).expect("determinism harness got an invalid config");
    for _ in 0..ticks {
        engine.tick();
    }
    engine.state_hash()
}

/// Run the same configuration `runs` times sequentially and compare.
#[must_use]
pub fn run_determinism_test(config: EngineConfig, ticks: u64, runs: usize) -> DeterminismResult {
    let hashes: Vec<u64> = (0..runs).map(|_| run_once(config, ticks)).collect();
    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    tracing::debug!(runs, ticks, is_deterministic, "determinism test finished");

    DeterminismResult {
        is_deterministic,
        hashes,
        ticks,
    }
}

/// Run the same configuration across threads and compare.
///
/// Thread scheduling must not be able to influence results; each thread
/// owns its own engine, so any divergence points at hidden shared state.
#[must_use]
pub fn run_parallel_determinism_test(
    config: EngineConfig,
    ticks: u64,
    runs: usize,
) -> DeterminismResult {
    let handles: Vec<_> = (0..runs)
        .map(|_| thread::spawn(move || run_once(config, ticks)))
        .collect();
    let hashes: Vec<u64> = handles
        .into_iter()
        .map(|h| h.join().expect("determinism run panicked"))
        .collect();
    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        ticks,
    }
}

/// Property-based testing strategies for engine inputs.
pub mod strategies {
    use castles_core::config::EngineConfig;
    use castles_core::grid::{BarracksKind, Position};
    use proptest::prelude::*;

    /// Generate an in-bounds position for the given board size.
    pub fn arb_position(width: i32, height: i32) -> impl Strategy<Value = Position> {
        (0..width, 0..height).prop_map(|(x, y)| Position::new(x, y))
    }

    /// Generate a position that may lie outside the board, for exercising
    /// rejection paths.
    pub fn arb_unbounded_position() -> impl Strategy<Value = Position> {
        (-20..40i32, -20..40i32).prop_map(|(x, y)| Position::new(x, y))
    }

    /// Generate a barracks kind.
    pub fn arb_barracks_kind() -> impl Strategy<Value = BarracksKind> {
        prop_oneof![Just(BarracksKind::Garrison), Just(BarracksKind::Mine)]
    }

    /// Generate an engine seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Generate a default config with an arbitrary seed.
    pub fn arb_config() -> impl Strategy<Value = EngineConfig> {
        arb_seed().prop_map(|seed| EngineConfig::default().with_seed(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_deterministic() {
        let config = EngineConfig::default().with_seed(99);
        run_determinism_test(config, 50, 4).assert_deterministic();
    }

    #[test]
    fn test_parallel_runs_match() {
        let config = EngineConfig::default().with_seed(7);
        run_parallel_determinism_test(config, 50, 4).assert_deterministic();
    }

    #[test]
    fn test_different_seeds_usually_differ() {
        let a = run_determinism_test(EngineConfig::default().with_seed(1), 50, 1);
        let b = run_determinism_test(EngineConfig::default().with_seed(2), 50, 1);
        assert_ne!(a.hashes, b.hashes);
    }
}
