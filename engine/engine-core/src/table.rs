//! Ply-partitioned position caches.
//!
//! Both search engines key their per-position records by fingerprint. Entries
//! are grouped by the number of discs on the board, so a whole ply can be
//! dropped at once when the live game has moved past it.
//!
//! Two variants share one interface:
//! - [`TranspositionTable`]: direct single-key lookup on the canonical fingerprint.
//! - [`SymmetryTable`]: a position and its horizontal reflection share one
//!   entry. Lookups report whether the entry was found through the mirror
//!   fingerprint, in which case any column stored inside it must be reflected
//!   by the caller.

use std::collections::HashMap;

use games_connect4::{Board, Fingerprint, BOARD_SIZE};
use thiserror::Error;

/// Number of ply buckets (0..=42 discs).
pub const PLIES: usize = BOARD_SIZE + 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("No cached entry for position {fingerprint:#x} at ply {ply}")]
    CacheMiss { ply: usize, fingerprint: Fingerprint },
}

/// Cached record found by a lookup.
#[derive(Debug)]
pub struct Probe<E> {
    pub entry: E,
    /// True when the entry was stored under the reflected position.
    pub mirrored: bool,
}

/// Fingerprint-keyed storage, one map per ply.
pub trait Table<T> {
    fn get(&self, board: &Board) -> Option<Probe<&T>>;

    fn get_mut(&mut self, board: &Board) -> Option<Probe<&mut T>>;

    /// Store `entry` for the current position, replacing any previous one.
    fn insert(&mut self, board: &Board, entry: T);

    fn remove(&mut self, board: &Board) -> Option<T>;

    /// Drop every entry of one ply.
    fn clear_ply(&mut self, ply: usize);

    /// Number of entries stored for one ply.
    fn ply_len(&self, ply: usize) -> usize;

    fn contains(&self, board: &Board) -> bool {
        self.get(board).is_some()
    }

    /// Lookup that treats a missing entry as an error.
    fn entry(&self, board: &Board) -> Result<Probe<&T>, TableError> {
        self.get(board).ok_or(TableError::CacheMiss {
            ply: board.moves(),
            fingerprint: board.fingerprint(),
        })
    }

    fn entry_mut(&mut self, board: &Board) -> Result<Probe<&mut T>, TableError> {
        self.get_mut(board).ok_or(TableError::CacheMiss {
            ply: board.moves(),
            fingerprint: board.fingerprint(),
        })
    }

    /// Drop every ply below `ply`; those positions can no longer occur.
    fn retire_before(&mut self, ply: usize) {
        for p in 0..ply.min(PLIES) {
            self.clear_ply(p);
        }
    }

    fn clear(&mut self) {
        self.retire_before(PLIES);
    }

    fn len(&self) -> usize {
        (0..PLIES).map(|p| self.ply_len(p)).sum()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
struct Buckets<T> {
    plies: Vec<HashMap<Fingerprint, T>>,
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self {
            plies: (0..PLIES).map(|_| HashMap::new()).collect(),
        }
    }
}

impl<T> Buckets<T> {
    #[inline]
    fn ply(&self, board: &Board) -> &HashMap<Fingerprint, T> {
        &self.plies[board.moves()]
    }

    #[inline]
    fn ply_mut(&mut self, board: &Board) -> &mut HashMap<Fingerprint, T> {
        &mut self.plies[board.moves()]
    }

    fn clear_ply(&mut self, ply: usize) {
        if let Some(bucket) = self.plies.get_mut(ply) {
            bucket.clear();
        }
    }

    fn ply_len(&self, ply: usize) -> usize {
        self.plies.get(ply).map_or(0, HashMap::len)
    }
}

/// Cache keyed on the canonical fingerprint only.
#[derive(Debug, Clone)]
pub struct TranspositionTable<T> {
    buckets: Buckets<T>,
}

impl<T> TranspositionTable<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Default for TranspositionTable<T> {
    fn default() -> Self {
        Self {
            buckets: Buckets::default(),
        }
    }
}

impl<T> Table<T> for TranspositionTable<T> {
    fn get(&self, board: &Board) -> Option<Probe<&T>> {
        self.buckets
            .ply(board)
            .get(&board.fingerprint())
            .map(|entry| Probe {
                entry,
                mirrored: false,
            })
    }

    fn get_mut(&mut self, board: &Board) -> Option<Probe<&mut T>> {
        self.buckets
            .ply_mut(board)
            .get_mut(&board.fingerprint())
            .map(|entry| Probe {
                entry,
                mirrored: false,
            })
    }

    fn insert(&mut self, board: &Board, entry: T) {
        self.buckets
            .ply_mut(board)
            .insert(board.fingerprint(), entry);
    }

    fn remove(&mut self, board: &Board) -> Option<T> {
        self.buckets.ply_mut(board).remove(&board.fingerprint())
    }

    fn clear_ply(&mut self, ply: usize) {
        self.buckets.clear_ply(ply);
    }

    fn ply_len(&self, ply: usize) -> usize {
        self.buckets.ply_len(ply)
    }
}

/// Cache that folds each position together with its mirror image.
#[derive(Debug, Clone)]
pub struct SymmetryTable<T> {
    buckets: Buckets<T>,
}

impl<T> SymmetryTable<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Default for SymmetryTable<T> {
    fn default() -> Self {
        Self {
            buckets: Buckets::default(),
        }
    }
}

impl<T> Table<T> for SymmetryTable<T> {
    fn get(&self, board: &Board) -> Option<Probe<&T>> {
        let bucket = self.buckets.ply(board);
        if let Some(entry) = bucket.get(&board.fingerprint()) {
            return Some(Probe {
                entry,
                mirrored: false,
            });
        }
        bucket.get(&board.mirror_fingerprint()).map(|entry| Probe {
            entry,
            mirrored: true,
        })
    }

    fn get_mut(&mut self, board: &Board) -> Option<Probe<&mut T>> {
        let bucket = self.buckets.ply_mut(board);
        let (key, mirrored) = if bucket.contains_key(&board.fingerprint()) {
            (board.fingerprint(), false)
        } else {
            (board.mirror_fingerprint(), true)
        };
        bucket
            .get_mut(&key)
            .map(|entry| Probe { entry, mirrored })
    }

    fn insert(&mut self, board: &Board, entry: T) {
        let bucket = self.buckets.ply_mut(board);
        // At most one key per symmetric pair
        bucket.remove(&board.mirror_fingerprint());
        bucket.insert(board.fingerprint(), entry);
    }

    fn remove(&mut self, board: &Board) -> Option<T> {
        let bucket = self.buckets.ply_mut(board);
        bucket
            .remove(&board.fingerprint())
            .or_else(|| bucket.remove(&board.mirror_fingerprint()))
    }

    fn clear_ply(&mut self, ply: usize) {
        self.buckets.clear_ply(ply);
    }

    fn ply_len(&self, ply: usize) -> usize {
        self.buckets.ply_len(ply)
    }
}
