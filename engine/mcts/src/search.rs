//! MCTS search implementation.
//!
//! Each iteration runs the four classic phases on the live board:
//! 1. Selection: descend through fully expanded nodes using the policy
//! 2. Expansion: add one untried child, skipping positions already cached
//! 3. Simulation: random playout from the new node to the end of the game
//! 4. Backpropagation: pop back to the root, crediting every node on the path

use std::time::{Duration, Instant};

use engine_core::{argmax_all, with_child, Search, SearchError, Table, TranspositionTable};
use games_connect4::{mirror_column, random_playout, Board, Outcome};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeRecord;
use crate::policy::Policy;

/// Statistics of the last `explore` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Iterations completed
    pub iterations: u32,
    /// Positions cached after the search
    pub table_size: usize,
    pub elapsed: Duration,
}

/// Monte Carlo engine over a pluggable node table.
#[derive(Debug)]
pub struct MonteCarloEngine<T = TranspositionTable<NodeRecord>> {
    config: MctsConfig,
    table: T,
    rng: ChaCha20Rng,
    stats: SearchStats,
}

impl<T: Table<NodeRecord> + Default> MonteCarloEngine<T> {
    pub fn new(config: MctsConfig) -> Self {
        Self::with_table(config, T::default())
    }
}

impl<T: Table<NodeRecord>> MonteCarloEngine<T> {
    pub fn with_table(config: MctsConfig, table: T) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self {
            config,
            table,
            rng,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    /// Run iterations until the budget or the deadline runs out.
    fn run(&mut self, board: &mut Board) -> Result<(), SearchError> {
        if board.is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        let start = Instant::now();
        let deadline = self.config.time_limit.map(|limit| start + limit);
        self.stats = SearchStats::default();

        if !self.table.contains(board) {
            self.table.insert(board, NodeRecord::new(board));
        }

        while self.stats.iterations < self.config.iterations {
            if deadline.map_or(false, |d| Instant::now() >= d) {
                break;
            }
            self.iterate(board)?;
            self.stats.iterations += 1;
        }

        self.stats.table_size = self.table.len();
        self.stats.elapsed = start.elapsed();
        debug!(
            iterations = self.stats.iterations,
            table_size = self.stats.table_size,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "Completed Monte Carlo search"
        );
        Ok(())
    }

    /// One select, expand, simulate, backpropagate cycle.
    fn iterate(&mut self, board: &mut Board) -> Result<(), SearchError> {
        let mut depth = 0usize;

        while !board.is_terminal() {
            let expanded = self.table.entry(board)?.entry.expanded;
            if !expanded {
                if let Some(column) = self.expand(board)? {
                    board.push(column)?;
                    depth += 1;
                    self.table.insert(board, NodeRecord::new(board));
                    break;
                }
                // Every remaining move led to a known position
            }

            let column = self.config.policy.select(board, &self.table, &mut self.rng)?;
            board.push(column)?;
            depth += 1;
        }

        let outcome = random_playout(board, &mut self.rng);
        trace!(depth, ?outcome, "Simulated");
        self.backpropagate(board, depth, outcome)
    }

    /// Pop untried moves until one reaches an uncached position.
    ///
    /// Returns that move without playing it, or `None` once the node has no
    /// untried moves left. Moves leading to known positions are discarded.
    fn expand(&mut self, board: &mut Board) -> Result<Option<u8>, SearchError> {
        loop {
            let column = {
                let probe = self.table.entry_mut(board)?;
                let node = probe.entry;
                let Some(column) = node.untried.pop() else {
                    node.expanded = true;
                    return Ok(None);
                };
                if node.untried.is_empty() {
                    node.expanded = true;
                }
                if probe.mirrored {
                    mirror_column(column)
                } else {
                    column
                }
            };

            let known = with_child(board, column, |child| Ok(self.table.contains(child)))?;
            if !known {
                return Ok(Some(column));
            }
        }
    }

    /// Credit the outcome to every node from the current position back to the root.
    fn backpropagate(
        &mut self,
        board: &mut Board,
        depth: usize,
        outcome: Outcome,
    ) -> Result<(), SearchError> {
        for level in (0..=depth).rev() {
            let credit = match outcome {
                Outcome::Draw => 0.5,
                Outcome::Win(winner) if winner == board.last_mover() => 1.0,
                Outcome::Win(_) => 0.0,
            };
            let node = self.table.entry_mut(board)?.entry;
            node.visits += 1;
            node.wins += credit;

            if level > 0 {
                board.pop()?;
            }
        }
        Ok(())
    }

    /// Child records of the current position, `None` for children not yet created.
    fn children(&self, board: &mut Board) -> Result<Vec<(u8, Option<NodeRecord>)>, SearchError> {
        board
            .open_columns()
            .into_iter()
            .map(|column| {
                let child = with_child(board, column, |child| {
                    Ok(self.table.get(child).map(|p| p.entry.clone()))
                })?;
                Ok((column, child))
            })
            .collect()
    }
}

impl<T: Table<NodeRecord>> Search for MonteCarloEngine<T> {
    fn name(&self) -> &'static str {
        match (self.config.policy, self.config.time_limit) {
            (Policy::Uniform, _) => "montecarlo",
            (Policy::Ucb1 { .. }, None) => "confidence",
            (Policy::Ucb1 { .. }, Some(_)) => "ucttime",
        }
    }

    fn explore(&mut self, board: &mut Board) -> Result<(), SearchError> {
        self.run(board)
    }

    fn best_moves(&self, board: &mut Board) -> Result<Vec<u8>, SearchError> {
        let best = argmax_all(self.key_values(board)?);
        if best.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        Ok(best)
    }

    fn key_values(&self, board: &mut Board) -> Result<Vec<(u8, f64)>, SearchError> {
        self.table.entry(board)?;
        let policy = self.config.policy;
        Ok(self
            .children(board)?
            .into_iter()
            .map(|(column, child)| (column, child.map_or(0.0, |c| policy.key_value(&c))))
            .collect())
    }

    fn normalized_value(&self, board: &mut Board, column: u8) -> Result<f64, SearchError> {
        let parent = self.table.entry(board)?.entry.clone();
        let child = with_child(board, column, |child| {
            Ok(self.table.get(child).map(|p| p.entry.clone()))
        })?;
        Ok(child.map_or(0.0, |c| self.config.policy.normalized(&c, &parent)))
    }

    fn retire_before(&mut self, ply: usize) {
        self.table.retire_before(ply);
    }
}
