//! Pending-match cache holding unmatched rows from one input

use crate::hash::RowHash;
use crate::Row;
use indexmap::IndexMap;

/// Which input a cache (or a row) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn ordinal(self) -> &'static str {
        match self {
            Side::A => "first",
            Side::B => "second",
        }
    }
}

/// Rows from one side still waiting for a counterpart, keyed by key hash
///
/// At most one row is kept per hash. Rows are owned copies, independent of
/// the reader's scratch buffer.
#[derive(Debug)]
pub struct PendingMatchCache {
    side: Side,
    rows: IndexMap<RowHash, Row>,
}

impl PendingMatchCache {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            rows: IndexMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Store `row` under `hash`, replacing any previous row
    ///
    /// Returns `true` when a row was already pending under that hash.
    pub fn put(&mut self, hash: RowHash, row: Row) -> bool {
        self.rows.insert(hash, row).is_some()
    }

    /// Remove and return the row pending under `hash`
    pub fn take(&mut self, hash: RowHash) -> Option<Row> {
        self.rows.swap_remove(&hash)
    }

    #[cfg(test)]
    pub fn contains(&self, hash: RowHash) -> bool {
        self.rows.contains_key(&hash)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Empty the cache, yielding every remaining row exactly once
    pub fn drain(&mut self) -> impl Iterator<Item = Row> + '_ {
        self.rows.drain(..).map(|(_, row)| row)
    }
}
