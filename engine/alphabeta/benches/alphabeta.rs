//! Alpha-beta benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p alphabeta`
//!
//! These benchmarks measure:
//! - Iterative deepening at increasing depths from the opening
//! - Principal-variation ordering against plain evaluation ordering
//! - Plain against symmetry-folding caches
//! - Exhaustive search near the end of a game

use alphabeta::{AlphaBetaConfig, AlphaBetaEngine, SymmetricAlphaBeta};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use engine_core::Search;
use games_connect4::Board;

/// Midgame position without a forced result at shallow depth.
const MIDGAME: [u8; 12] = [3, 3, 2, 4, 4, 2, 3, 5, 1, 2, 5, 5];

fn play_moves(columns: &[u8]) -> Board {
    Board::from_moves(columns).unwrap()
}

fn bench_depths(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_depths");
    group.sample_size(20);

    for depth in [2u8, 4, 6, 8] {
        group.bench_with_input(BenchmarkId::new("opening", depth), &depth, |b, &depth| {
            let config = AlphaBetaConfig::default().with_depth(depth);
            b.iter(|| {
                let mut board = Board::new();
                let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(config.clone());
                engine.explore(&mut board).unwrap();
                black_box(engine.stats().nodes)
            });
        });
    }

    group.finish();
}

fn bench_principal_variation(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_principal_variation");
    group.sample_size(20);

    for enabled in [true, false] {
        let name = if enabled { "with_pv" } else { "without_pv" };
        group.bench_function(name, |b| {
            let config = AlphaBetaConfig::default()
                .with_depth(7)
                .with_principal_variation(enabled);
            b.iter(|| {
                let mut board = play_moves(&MIDGAME);
                let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(config.clone());
                engine.explore(&mut board).unwrap();
                black_box(engine.stats().nodes)
            });
        });
    }

    group.finish();
}

fn bench_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_tables");
    group.sample_size(20);
    let config = AlphaBetaConfig::default().with_depth(7);

    group.bench_function("plain", |b| {
        b.iter(|| {
            let mut board = Board::new();
            let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(config.clone());
            engine.explore(&mut board).unwrap();
            black_box(engine.best_moves(&mut board).unwrap())
        });
    });

    group.bench_function("symmetric", |b| {
        b.iter(|| {
            let mut board = Board::new();
            let mut engine: SymmetricAlphaBeta = AlphaBetaEngine::new(config.clone());
            engine.explore(&mut board).unwrap();
            black_box(engine.best_moves(&mut board).unwrap())
        });
    });

    group.finish();
}

fn bench_endgame(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_endgame");
    group.sample_size(20);

    // 34 discs, 8 empty cells: searched to the end of the game
    let moves = [
        4, 3, 6, 0, 1, 4, 5, 5, 1, 1, 5, 0, 1, 6, 0, 1, 5, 5, 1, 0, 4, 6, 3, 2, 6, 6, 0, 4, 6, 5,
        2, 0, 4, 2,
    ];
    group.bench_function("exhaustive_8_empty", |b| {
        let config = AlphaBetaConfig::default().with_depth(42);
        b.iter(|| {
            let mut board = play_moves(&moves);
            let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(config.clone());
            engine.explore(&mut board).unwrap();
            black_box(engine.stats().score)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_depths,
    bench_principal_variation,
    bench_tables,
    bench_endgame
);
criterion_main!(benches);
