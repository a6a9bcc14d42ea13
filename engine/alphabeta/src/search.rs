//! Iterative-deepening negamax with alpha-beta pruning.
//!
//! Each `explore` call runs passes of depth 1, 2, ... up to the configured
//! maximum. A pass reuses the cache of the previous one in two ways:
//! 1. Move ordering: children are sorted by their cached static evaluation.
//! 2. Principal variation: at principal nodes the best move recorded by the
//!    previous pass is searched first.
//!
//! The root searches every child with a window one point below the best
//! value found so far, so every move tied for the best value is recorded.

use std::time::{Duration, Instant};

use engine_core::{with_child, Search, SearchError, Table, TranspositionTable};
use games_connect4::{Board, Outcome, BOARD_SIZE};
use tracing::{debug, trace};

use crate::config::AlphaBetaConfig;
use crate::entry::{column_bit, mirror_mask, Bound, CacheEntry};

/// Score of a won position for the winner.
pub const WIN: i32 = 10_000;

/// Larger than any reachable score.
pub const INFINITY: i32 = WIN + 1;

/// Statistics of the last `explore` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered across all passes
    pub nodes: u64,
    /// Depth of the last completed pass
    pub depth: u8,
    /// Root score of the last completed pass
    pub score: i32,
    /// Whether the deadline cut a pass short
    pub timed_out: bool,
    pub elapsed: Duration,
}

/// Alpha-beta engine over a pluggable position cache.
#[derive(Debug)]
pub struct AlphaBetaEngine<T = TranspositionTable<CacheEntry>> {
    config: AlphaBetaConfig,
    table: T,
    stats: SearchStats,
    deadline: Option<Instant>,
    /// Depth of the pass in progress
    pass_depth: u8,
    aborted: bool,
}

impl<T: Table<CacheEntry> + Default> AlphaBetaEngine<T> {
    pub fn new(config: AlphaBetaConfig) -> Self {
        Self::with_table(config, T::default())
    }
}

impl<T: Table<CacheEntry>> AlphaBetaEngine<T> {
    pub fn with_table(config: AlphaBetaConfig, table: T) -> Self {
        Self {
            config,
            table,
            stats: SearchStats::default(),
            deadline: None,
            pass_depth: 0,
            aborted: false,
        }
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    /// Deepen from 1 to the maximum depth, or until the deadline passes.
    fn deepen(&mut self, board: &mut Board) -> Result<(), SearchError> {
        if board.is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        let start = Instant::now();
        let empty = (BOARD_SIZE - board.moves()) as u8;
        let max_depth = self.config.max_depth.clamp(1, empty);

        self.stats = SearchStats::default();
        self.deadline = self.config.time_limit.map(|limit| start + limit);

        for depth in 1..=max_depth {
            self.pass_depth = depth;
            self.aborted = false;

            let score = self.search_root(board, depth)?;
            if self.aborted {
                self.stats.timed_out = true;
                debug!(depth, nodes = self.stats.nodes, "Deadline reached, pass discarded");
                break;
            }

            self.stats.depth = depth;
            self.stats.score = score;
            debug!(
                depth,
                score,
                nodes = self.stats.nodes,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Completed pass"
            );

            if self.deadline_passed() {
                self.stats.timed_out = depth < max_depth;
                break;
            }
        }

        self.stats.elapsed = start.elapsed();
        Ok(())
    }

    #[inline]
    fn deadline_passed(&self) -> bool {
        self.deadline.map_or(false, |d| Instant::now() >= d)
    }

    #[inline]
    fn out_of_time(&self) -> bool {
        // The first pass always runs to completion
        self.pass_depth > 1 && self.deadline_passed()
    }

    /// Search the root with a tie-detecting window and record every best move.
    fn search_root(&mut self, board: &mut Board, depth: u8) -> Result<i32, SearchError> {
        self.stats.nodes += 1;

        let (first, order) = self.order_moves(board, depth, true)?;
        let mut value = -INFINITY;
        let mut best = 0u8;

        for column in order {
            // One below the best so far: equal scores come back exact
            let alpha = if value == -INFINITY { -INFINITY } else { value - 1 };
            board.push(column)?;
            let score = self.negamax(board, depth - 1, -INFINITY, -alpha, first == Some(column));
            board.pop()?;
            let score = -score?;

            if self.aborted {
                return Ok(value);
            }
            if score > value {
                value = score;
                best = column_bit(column);
            } else if score == value {
                best |= column_bit(column);
            }
        }

        let static_eval = self.cached_eval(board);
        self.table.insert(
            board,
            CacheEntry {
                score: value,
                bound: Bound::Exact,
                depth,
                best,
                static_eval,
            },
        );
        Ok(value)
    }

    fn negamax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        principal: bool,
    ) -> Result<i32, SearchError> {
        self.stats.nodes += 1;
        if self.out_of_time() {
            self.aborted = true;
            return Ok(-INFINITY);
        }

        let probe = self.table.get(board).map(|p| *p.entry);
        if let Some(entry) = probe {
            if entry.answers(depth, alpha, beta) {
                return Ok(entry.score);
            }
        }

        if let Some(outcome) = board.winner() {
            // The side to move never wins: the previous mover just did
            let score = match outcome {
                Outcome::Draw => 0,
                Outcome::Win(_) => -WIN,
            };
            let static_eval = probe.and_then(|e| e.static_eval);
            self.table
                .insert(board, CacheEntry::terminal(score, static_eval));
            return Ok(score);
        }

        if depth == 0 {
            return Ok(self.static_eval(board));
        }

        let alpha_orig = alpha;
        let (first, order) = self.order_moves(board, depth, principal)?;
        let mut value = -INFINITY;
        let mut best = 0u8;

        for column in order {
            board.push(column)?;
            let score = self.negamax(board, depth - 1, -beta, -alpha, first == Some(column));
            board.pop()?;
            let score = -score?;

            if self.aborted {
                // Partial result, never cached
                return Ok(value);
            }
            if score > value {
                value = score;
                best = column_bit(column);
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }

        let bound = if value <= alpha_orig {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        let static_eval = self.cached_eval(board);
        self.table.insert(
            board,
            CacheEntry {
                score: value,
                bound,
                depth,
                best,
                static_eval,
            },
        );

        trace!(ply = board.moves(), depth, value, ?bound, "Stored node");
        Ok(value)
    }

    /// Children in search order, with the principal move (if any) first.
    fn order_moves(
        &mut self,
        board: &mut Board,
        depth: u8,
        principal: bool,
    ) -> Result<(Option<u8>, Vec<u8>), SearchError> {
        let open = board.open_columns();

        let first = if principal && depth > 1 && self.config.principal_variation {
            self.table.get(board).and_then(|probe| {
                let mask = if probe.mirrored {
                    mirror_mask(probe.entry.best)
                } else {
                    probe.entry.best
                };
                open.iter()
                    .copied()
                    .find(|&column| mask & column_bit(column) != 0)
            })
        } else {
            None
        };

        let mut keyed = Vec::with_capacity(open.len());
        for column in open {
            if Some(column) == first {
                continue;
            }
            board.push(column)?;
            // Lowest first: the child's evaluation is from the opponent's side
            let key = self.static_eval(board);
            board.pop()?;
            keyed.push((key, column));
        }
        keyed.sort_by_key(|&(key, _)| key);

        let order = first
            .into_iter()
            .chain(keyed.into_iter().map(|(_, column)| column))
            .collect();
        Ok((first, order))
    }

    /// Cached static evaluation of the position, computing and storing it on a miss.
    fn static_eval(&mut self, board: &Board) -> i32 {
        if let Some(probe) = self.table.get_mut(board) {
            if let Some(eval) = probe.entry.static_eval {
                return eval;
            }
            let eval = board.evaluate();
            probe.entry.static_eval = Some(eval);
            return eval;
        }
        let eval = board.evaluate();
        self.table.insert(board, CacheEntry::estimate(eval));
        eval
    }

    fn cached_eval(&self, board: &Board) -> Option<i32> {
        self.table.get(board).and_then(|p| p.entry.static_eval)
    }

    /// Cached score of the child reached by `column`, from the child's side.
    fn child_score(&self, board: &mut Board, column: u8) -> Result<i32, SearchError> {
        with_child(board, column, |child| {
            Ok(self.table.entry(child)?.entry.score)
        })
    }
}

impl<T: Table<CacheEntry>> Search for AlphaBetaEngine<T> {
    fn name(&self) -> &'static str {
        if self.config.time_limit.is_some() {
            "idtime"
        } else {
            "iterative"
        }
    }

    fn explore(&mut self, board: &mut Board) -> Result<(), SearchError> {
        self.deepen(board)
    }

    fn best_moves(&self, board: &mut Board) -> Result<Vec<u8>, SearchError> {
        let probe = self.table.entry(board)?;
        let columns = probe.entry.best_columns(probe.mirrored);
        if columns.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        Ok(columns)
    }

    fn key_values(&self, board: &mut Board) -> Result<Vec<(u8, f64)>, SearchError> {
        board
            .open_columns()
            .into_iter()
            .map(|column| Ok((column, -self.child_score(board, column)? as f64)))
            .collect()
    }

    fn normalized_value(&self, board: &mut Board, column: u8) -> Result<f64, SearchError> {
        let score = self.child_score(board, column)?;
        Ok(100.0 * (WIN - score) as f64 / (2 * WIN) as f64)
    }

    fn retire_before(&mut self, ply: usize) {
        self.table.retire_before(ply);
    }
}

