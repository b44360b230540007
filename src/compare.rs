//! Field-level row comparison and the two-value delta encoding

use crate::config::{DeltaFormat, DiffConfig, PLACEHOLDER};
use crate::delta::{DeltaField, FieldValue};
use crate::summary::ModifiedFields;
use crate::Row;

const BOLD_ON: &[u8] = b"\x1b[1m";
const BOLD_OFF: &[u8] = b"\x1b[0m";

/// Compare two rows sharing a key
///
/// Returns `None` when no non-ignored position differs, counting positions
/// present on only one side as differing. Otherwise returns one slot per
/// position of the wider row; every changed position is recorded in
/// `modified`.
pub fn compare<'a>(
    row_a: &'a Row,
    row_b: &'a Row,
    config: &DiffConfig,
    modified: &mut ModifiedFields,
) -> Option<Vec<DeltaField<'a>>> {
    let min_len = row_a.len().min(row_b.len());
    let max_len = row_a.len().max(row_b.len());

    let mut fields = Vec::with_capacity(max_len);
    let mut same = true;

    for (i, (a, b)) in row_a.iter().zip(row_b.iter()).enumerate() {
        if !config.is_ignored(i) && a != b {
            same = false;
            modified.mark(i);
            fields.push(DeltaField::Changed {
                old: FieldValue::Present(a),
                new: FieldValue::Present(b),
            });
        } else {
            fields.push(DeltaField::Same(a));
        }
    }

    for i in min_len..max_len {
        if config.is_ignored(i) {
            fields.push(DeltaField::Blank);
            continue;
        }
        same = false;
        modified.mark(i);
        let field = match (row_a.get(i), row_b.get(i)) {
            (Some(a), _) => DeltaField::Changed {
                old: FieldValue::Present(a),
                new: FieldValue::Absent,
            },
            (None, Some(b)) => DeltaField::Changed {
                old: FieldValue::Absent,
                new: FieldValue::Present(b),
            },
            (None, None) => DeltaField::Blank,
        };
        fields.push(field);
    }

    if same {
        None
    } else {
        Some(fields)
    }
}

/// Renders delta fields to output bytes
#[derive(Debug, Clone, Copy)]
pub struct DeltaEncoder {
    format: DeltaFormat,
    symbol: u8,
}

impl DeltaEncoder {
    pub fn new(format: DeltaFormat, symbol: u8) -> Self {
        Self { format, symbol }
    }

    pub fn from_config(config: &DiffConfig) -> Self {
        Self::new(config.format, config.symbol)
    }

    /// Write the bytes of one field slot into `out`, replacing its contents
    pub fn encode_field(&self, field: &DeltaField<'_>, out: &mut Vec<u8>) {
        out.clear();
        match *field {
            DeltaField::Same(value) => out.extend_from_slice(value),
            DeltaField::Changed { old, new } => self.encode_pair(old, new, out),
            DeltaField::Blank => {}
        }
    }

    fn encode_pair(&self, old: FieldValue<'_>, new: FieldValue<'_>, out: &mut Vec<u8>) {
        let old = value_bytes(old);
        let new = value_bytes(new);
        match self.format {
            DeltaFormat::Bold => {
                out.extend_from_slice(BOLD_ON);
                out.extend_from_slice(old);
                out.extend_from_slice(BOLD_OFF);
                out.push(self.symbol);
                out.extend_from_slice(BOLD_ON);
                out.extend_from_slice(new);
                out.extend_from_slice(BOLD_OFF);
            }
            DeltaFormat::Piped => {
                out.extend_from_slice(old);
                out.extend_from_slice(&[self.symbol, b'-', self.symbol]);
                out.extend_from_slice(new);
            }
            DeltaFormat::Newline => {
                out.extend_from_slice(old);
                out.push(b'\n');
                out.extend_from_slice(new);
            }
        }
    }
}

fn value_bytes(value: FieldValue<'_>) -> &[u8] {
    match value {
        FieldValue::Present(bytes) => bytes,
        FieldValue::Absent => PLACEHOLDER,
    }
}
