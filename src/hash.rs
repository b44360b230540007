//! Key hashing for row matching

use crate::Row;
use blake3::Hasher;
use std::fmt;

/// 64-bit digest of a row's key fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHash(pub u64);

impl fmt::Display for RowHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Hashes the designated key fields of a row
///
/// The digest covers the key fields concatenated in key order with no
/// separator, so `["ab", "c"]` and `["a", "bc"]` hash identically when both
/// fields are keys. Changing that would change which rows match.
pub struct KeyHasher {
    hasher: Hasher,
}

impl KeyHasher {
    pub fn new() -> Self {
        Self {
            hasher: Hasher::new(),
        }
    }

    /// Compute the key hash of `row`
    ///
    /// Key positions past the end of the row contribute nothing; callers
    /// validate ranges before relying on the result.
    pub fn hash(&mut self, row: &Row, keys: &[usize]) -> RowHash {
        self.hasher.reset();
        for &key in keys {
            if let Some(field) = row.get(key) {
                self.hasher.update(field);
            }
        }
        let digest = self.hasher.finalize();
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest.as_bytes()[..8]);
        RowHash(u64::from_le_bytes(prefix))
    }
}

impl Default for KeyHasher {
    fn default() -> Self {
        Self::new()
    }
}
