//! Simulation benchmarks for castles_core.
//!
//! Run with: `cargo bench -p castles_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use castles_core::config::EngineConfig;
use castles_core::control::control_at;
use castles_core::engine::Engine;
use castles_core::grid::Position;

/// A full tick loop on the default board.
pub fn tick_benchmark(c: &mut Criterion) {
    c.bench_function("tick_100", |b| {
        b.iter(|| {
            let mut engine = Engine::new(EngineConfig::default().with_seed(7)).unwrap();
            for _ in 0..100 {
                black_box(engine.tick());
            }
            black_box(engine.state_hash())
        })
    });
}

/// Control evaluation over every cell of the board.
pub fn control_benchmark(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default().with_seed(7)).unwrap();
    let config = *engine.config();

    c.bench_function("control_full_board", |b| {
        b.iter(|| {
            let mut contested = 0u32;
            for y in 0..config.grid_height {
                for x in 0..config.grid_width {
                    let control = control_at(engine.grid(), &config, Position::new(x, y));
                    if control.contested() {
                        contested += 1;
                    }
                }
            }
            black_box(contested)
        })
    });
}

criterion_group!(benches, tick_benchmark, control_benchmark);
criterion_main!(benches);
