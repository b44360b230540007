//! Run-level counters and the modified-field report

use crate::Row;
use serde::{Serialize, Serializer};

/// Field positions ever observed as part of a modification
///
/// Sized once the header width is known. Marks past the end are dropped,
/// which happens for rows wider than the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifiedFields {
    flags: Vec<bool>,
}

impl ModifiedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resize(&mut self, width: usize) {
        self.flags = vec![false; width];
    }

    pub fn mark(&mut self, index: usize) {
        if let Some(flag) = self.flags.get_mut(index) {
            *flag = true;
        }
    }

    #[cfg(test)]
    pub fn is_marked(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// 0-based positions marked so far, in ascending order
    pub fn positions(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &marked)| marked.then_some(i))
            .collect()
    }
}

/// Aggregate outcome of one reconciliation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Read steps that produced at least one row
    pub total: u64,
    pub added: u64,
    pub removed: u64,
    pub modified: u64,
    pub unchanged: u64,
    /// Rows overwritten in a pending cache by a later row with the same key
    pub duplicates: u64,
    #[serde(serialize_with = "serialize_labels")]
    pub modified_fields: ModifiedFields,
    #[serde(skip)]
    pub header: Option<Row>,
}

impl RunSummary {
    pub fn has_differences(&self) -> bool {
        self.added + self.removed + self.modified > 0
    }

    /// Process exit status: 1 when any row was added, removed or modified
    pub fn exit_code(&self) -> i32 {
        if self.has_differences() {
            1
        } else {
            0
        }
    }

    /// Modified fields as `name (n)` when a header is known, else `n` (1-based)
    pub fn modified_field_labels(&self) -> Vec<String> {
        self.modified_fields
            .positions()
            .into_iter()
            .map(|i| match self.header.as_ref().and_then(|h| h.get(i)) {
                Some(name) => format!("{} ({})", String::from_utf8_lossy(name), i + 1),
                None => (i + 1).to_string(),
            })
            .collect()
    }
}

fn serialize_labels<S: Serializer>(fields: &ModifiedFields, serializer: S) -> Result<S::Ok, S::Error> {
    let positions: Vec<usize> = fields.positions().into_iter().map(|i| i + 1).collect();
    positions.serialize(serializer)
}
