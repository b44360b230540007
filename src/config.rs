//! Immutable run configuration consumed by the reconciliation engine

use crate::error::{Result, RowDeltaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Placeholder written for a field missing on the shorter side
pub const PLACEHOLDER: &[u8] = b"_";

/// How the old and new values of a changed field are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaFormat {
    /// ANSI bold old and new values around the symbol
    Bold,
    /// `old|-|new`
    Piped,
    /// `old` and `new` on separate lines
    Newline,
}

impl DeltaFormat {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "bold" | "ansi" | "0" => Ok(Self::Bold),
            "piped" | "pipe" | "1" => Ok(Self::Piped),
            "newline" | "2" => Ok(Self::Newline),
            _ => Err(format!(
                "Invalid delta format: {}. Use 'bold', 'piped' or 'newline'",
                s
            )),
        }
    }
}

/// Symbol placed between old and new values, chosen to differ from the separator
pub fn symbol_for(separator: u8) -> u8 {
    if separator == b'|' {
        b'!'
    } else {
        b'|'
    }
}

/// Everything the reconciliation loop needs to know about a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// 0-based key field positions, in hashing order
    pub keys: Vec<usize>,
    /// 0-based positions excluded from equality
    pub ignored: BTreeSet<usize>,
    /// Output separator, also the input separator unless guessing
    pub separator: u8,
    /// Sniff each input's separator from its first line
    pub guess_separator: bool,
    pub has_header: bool,
    pub quoted: bool,
    pub format: DeltaFormat,
    pub symbol: u8,
    /// Emit `=` rows for unchanged pairs
    pub emit_unchanged: bool,
}

impl DiffConfig {
    /// Build a configuration from 1-based key and ignored positions
    pub fn new(keys: &[usize], ignored: &[usize]) -> Result<Self> {
        if keys.is_empty() {
            return Err(RowDeltaError::config("Missing key field index"));
        }
        Ok(Self {
            keys: to_zero_based(keys)?,
            ignored: to_zero_based(ignored)?.into_iter().collect(),
            separator: b',',
            guess_separator: false,
            has_header: true,
            quoted: true,
            format: DeltaFormat::Piped,
            symbol: symbol_for(b','),
            emit_unchanged: false,
        })
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self.symbol = symbol_for(separator);
        self
    }

    pub fn with_format(mut self, format: DeltaFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_unchanged(mut self, emit_unchanged: bool) -> Self {
        self.emit_unchanged = emit_unchanged;
        self
    }

    pub fn is_ignored(&self, index: usize) -> bool {
        self.ignored.contains(&index)
    }
}

fn to_zero_based(indices: &[usize]) -> Result<Vec<usize>> {
    indices
        .iter()
        .map(|&index| {
            index
                .checked_sub(1)
                .ok_or_else(|| RowDeltaError::config("Field indexes start at 1"))
        })
        .collect()
}
