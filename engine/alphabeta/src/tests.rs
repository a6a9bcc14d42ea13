use std::time::Duration;

use engine_core::{
    Analysis, Search, SearchError, SymmetryTable, Table, TableError, TranspositionTable,
};
use games_connect4::{Board, Outcome, BOARD_SIZE};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::*;

type Plain = TranspositionTable<CacheEntry>;
type Folded = SymmetryTable<CacheEntry>;

/// Random position with `moves` discs where no move along the way ended the game.
fn quiet_position(seed: u64, moves: usize) -> Option<Board> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut board = Board::new();
    while board.moves() < moves {
        let mut open = board.open_columns();
        open.shuffle(&mut rng);
        let mut placed = false;
        for column in open {
            board.push(column).unwrap();
            if !board.is_terminal() {
                placed = true;
                break;
            }
            board.pop().unwrap();
        }
        if !placed {
            return None;
        }
    }
    Some(board)
}

/// Exhaustive negamax value of a position.
fn brute_force(board: &mut Board) -> i32 {
    match board.winner() {
        Some(Outcome::Draw) => return 0,
        Some(Outcome::Win(_)) => return -WIN,
        None => {}
    }
    let mut best = -INFINITY;
    for column in board.open_columns() {
        board.push(column).unwrap();
        best = best.max(-brute_force(board));
        board.pop().unwrap();
    }
    best
}

fn explore_at<T: Table<CacheEntry> + Default>(
    board: &mut Board,
    config: AlphaBetaConfig,
) -> (i32, Vec<u8>, AlphaBetaEngine<T>) {
    let mut engine = AlphaBetaEngine::<T>::new(config);
    engine.explore(board).unwrap();
    let best = engine.best_moves(board).unwrap();
    (engine.stats().score, best, engine)
}

#[test]
fn test_finds_immediate_win() {
    let mut board = Board::from_moves(&[0, 1, 0, 1, 0, 1]).unwrap();

    for depth in 1..=5 {
        let config = AlphaBetaConfig::default().with_depth(depth);
        let (score, best, _) = explore_at::<Plain>(&mut board, config.clone());
        assert_eq!(score, WIN, "depth {}", depth);
        assert_eq!(best, vec![0], "depth {}", depth);

        let (score, best, _) = explore_at::<Folded>(&mut board, config);
        assert_eq!(score, WIN, "depth {}", depth);
        assert_eq!(best, vec![0], "depth {}", depth);
    }
}

#[test]
fn test_blocks_vertical_threat() {
    // Player two to move; player one has three stacked in column 0
    let mut board = Board::from_moves(&[0, 1, 0, 1, 0]).unwrap();
    let expected = [14, -19, -5, -10, 9];

    for (depth, &value) in (1..=5).zip(expected.iter()) {
        let config = AlphaBetaConfig::default().with_depth(depth);
        let (score, best, _) = explore_at::<Plain>(&mut board, config);
        assert_eq!(score, value, "depth {}", depth);
        assert_eq!(best, vec![0], "depth {}", depth);
    }
}

#[test]
fn test_empty_board_passes() {
    let expected: [(i32, Vec<u8>); 5] = [
        (7, vec![3]),
        (-3, vec![1, 2, 3, 4, 5]),
        (20, vec![3]),
        (-4, vec![3]),
        (27, vec![2, 3, 4]),
    ];

    for (depth, (value, moves)) in (1..=5).zip(expected.iter()) {
        for principal_variation in [true, false] {
            let config = AlphaBetaConfig::default()
                .with_depth(depth)
                .with_principal_variation(principal_variation);

            let mut board = Board::new();
            let (score, best, _) =
                explore_at::<Plain>(&mut board, config.clone());
            assert_eq!(score, *value, "depth {} pv {}", depth, principal_variation);
            assert_eq!(&best, moves, "depth {} pv {}", depth, principal_variation);

            let (score, best, _) = explore_at::<Folded>(&mut board, config);
            assert_eq!(score, *value, "depth {} pv {} (symmetric)", depth, principal_variation);
            assert_eq!(&best, moves, "depth {} pv {} (symmetric)", depth, principal_variation);
        }
    }
}

#[test]
fn test_matches_brute_force_near_the_end() {
    let mut checked = 0;
    for seed in 0..40 {
        let Some(mut board) = quiet_position(seed, BOARD_SIZE - 8) else {
            continue;
        };

        let config = AlphaBetaConfig::default().with_depth(BOARD_SIZE as u8);
        let (score, best, engine) =
            explore_at::<Plain>(&mut board, config);
        assert_eq!(engine.stats().depth, 8, "seed {}", seed);

        let expected = brute_force(&mut board);
        assert_eq!(score, expected, "seed {}", seed);

        let mut tied = Vec::new();
        for column in board.open_columns() {
            board.push(column).unwrap();
            if -brute_force(&mut board) == expected {
                tied.push(column);
            }
            board.pop().unwrap();
        }
        assert_eq!(best, tied, "seed {}", seed);
        checked += 1;
    }
    assert!(checked >= 20, "only {} positions checked", checked);
}

#[test]
fn test_principal_variation_changes_only_node_counts() {
    for seed in 0..10 {
        let Some(mut board) = quiet_position(seed, 12) else {
            continue;
        };
        let with_pv = AlphaBetaConfig::default().with_depth(5);
        let without_pv = with_pv.clone().with_principal_variation(false);

        let (score_a, best_a, _) =
            explore_at::<Plain>(&mut board, with_pv.clone());
        let (score_b, best_b, _) =
            explore_at::<Plain>(&mut board, without_pv);
        let (score_c, best_c, _) = explore_at::<Folded>(&mut board, with_pv);

        assert_eq!(score_a, score_b, "seed {}", seed);
        assert_eq!(best_a, best_b, "seed {}", seed);
        assert_eq!(score_a, score_c, "seed {}", seed);
        assert_eq!(best_a, best_c, "seed {}", seed);
    }
}

#[test]
fn test_symmetric_table_stores_fewer_entries() {
    let mut board = Board::new();
    let config = AlphaBetaConfig::default().with_depth(4);
    let (_, _, plain) = explore_at::<Plain>(&mut board, config.clone());
    let (_, _, folded) = explore_at::<Folded>(&mut board, config);
    assert!(folded.table().len() < plain.table().len());
}

#[test]
fn test_explore_leaves_board_unchanged() {
    let mut board = Board::from_moves(&[3, 3, 2, 4]).unwrap();
    let before = board.clone();
    let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(AlphaBetaConfig::for_testing());
    engine.explore(&mut board).unwrap();
    engine.key_values(&mut board).unwrap();
    assert_eq!(board, before);
    assert!(engine.stats().nodes > 0);
}

#[test]
fn test_terminal_board_is_rejected() {
    let mut board = Board::from_moves(&[0, 1, 0, 1, 0, 1, 0]).unwrap();
    let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(AlphaBetaConfig::for_testing());
    assert_eq!(engine.explore(&mut board), Err(SearchError::NoLegalMoves));
}

#[test]
fn test_key_values_and_normalized_values() {
    let mut board = Board::from_moves(&[0, 1, 0, 1, 0, 1]).unwrap();
    let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(AlphaBetaConfig::default().with_depth(4));
    engine.explore(&mut board).unwrap();

    let values = engine.key_values(&mut board).unwrap();
    assert_eq!(values.len(), 7);
    assert_eq!(values[0], (0, WIN as f64));
    assert!(values[1..].iter().all(|&(_, v)| v < WIN as f64));

    assert_eq!(engine.normalized_value(&mut board, 0).unwrap(), 100.0);
    for (_, value) in engine.normalized_key_values(&mut board).unwrap() {
        assert!((0.0..=100.0).contains(&value));
    }
}

#[test]
fn test_queries_before_explore_miss_the_cache() {
    let mut board = Board::from_moves(&[3]).unwrap();
    let engine: AlphaBetaEngine = AlphaBetaEngine::new(AlphaBetaConfig::for_testing());
    assert!(matches!(
        engine.best_moves(&mut board),
        Err(SearchError::Table(TableError::CacheMiss { ply: 1, .. }))
    ));
}

#[test]
fn test_retire_before_drops_root() {
    let mut board = Board::from_moves(&[3, 3]).unwrap();
    let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(AlphaBetaConfig::for_testing());
    engine.explore(&mut board).unwrap();

    let stored = engine.table().len();
    engine.retire_before(2);
    assert_eq!(engine.table().len(), stored);
    assert!(engine.best_moves(&mut board).is_ok());

    engine.retire_before(3);
    assert_eq!(engine.table().ply_len(2), 0);
    assert!(engine.best_moves(&mut board).is_err());
}

#[test]
fn test_time_bounded_completes_first_pass() {
    let mut board = Board::new();
    let config = AlphaBetaConfig::timed(Duration::ZERO);
    let mut engine: AlphaBetaEngine = AlphaBetaEngine::new(config);

    engine.explore(&mut board).unwrap();
    assert_eq!(engine.stats().depth, 1);
    assert!(engine.stats().timed_out);
    assert_eq!(engine.best_moves(&mut board).unwrap(), vec![3]);
    assert_eq!(engine.name(), "idtime");
}

#[test]
fn test_time_bounded_stops_near_deadline() {
    let mut board = Board::new();
    let limit = Duration::from_millis(50);
    let mut engine: SymmetricAlphaBeta = AlphaBetaEngine::new(AlphaBetaConfig::timed(limit));

    engine.explore(&mut board).unwrap();
    let stats = *engine.stats();
    assert!(stats.timed_out);
    assert!(stats.depth >= 1 && stats.depth < BOARD_SIZE as u8);
    assert!(stats.elapsed < limit + Duration::from_secs(2), "{:?}", stats.elapsed);
    assert_eq!(board, Board::new());

    // The last completed pass still answers queries
    let best = engine.best_moves(&mut board).unwrap();
    assert!(!best.is_empty());
}

#[test]
fn test_analysis_over_a_game() {
    let mut rng = ChaCha20Rng::seed_from_u64(17);
    let engine: AlphaBetaEngine = AlphaBetaEngine::new(AlphaBetaConfig::for_testing());
    let mut analysis = Analysis::new(engine);
    let mut board = Board::new();

    while !board.is_terminal() {
        analysis.explore(&mut board).unwrap();
        if board.moves() > 0 {
            // Plies behind the game are retired before each search
            assert_eq!(analysis.engine().table().ply_len(board.moves() - 1), 0);
        }

        let column = analysis.suggest(&mut board, &mut rng).unwrap();
        assert!(analysis.best_moves(&mut board).unwrap().contains(&column));
        board.push(column).unwrap();
    }
    assert_eq!(analysis.engine().name(), "iterative");
}
