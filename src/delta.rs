//! Typed delta rows produced by the reconciliation loop
//!
//! Markers stay an enum until the output boundary, so a field whose content
//! happens to be `#` or `+` can never be mistaken for a classification.

use crate::Row;

/// Classification of one reconciled outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Unchanged,
    Added,
    Removed,
    Modified,
}

impl Marker {
    /// Byte written as the first field of the delta row
    pub fn as_byte(self) -> u8 {
        match self {
            Marker::Unchanged => b'=',
            Marker::Added => b'+',
            Marker::Removed => b'-',
            Marker::Modified => b'#',
        }
    }
}

/// One side of a changed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Present(&'a [u8]),
    /// The row on this side is shorter than the other one
    Absent,
}

/// A single field slot of a modified row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaField<'a> {
    Same(&'a [u8]),
    Changed {
        old: FieldValue<'a>,
        new: FieldValue<'a>,
    },
    /// Ignored position past the end of the shorter row
    Blank,
}

impl<'a> DeltaField<'a> {
    #[cfg(test)]
    pub fn is_changed(&self) -> bool {
        matches!(self, DeltaField::Changed { .. })
    }

    /// Value that survives in the reference position, used to label headers
    pub fn surviving(&self) -> &'a [u8] {
        match *self {
            DeltaField::Same(value) => value,
            DeltaField::Changed {
                old: FieldValue::Present(value),
                ..
            } => value,
            DeltaField::Changed {
                new: FieldValue::Present(value),
                ..
            } => value,
            _ => b"",
        }
    }
}

/// The emitted unit of the delta stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaRow<'a> {
    /// Added, removed or unchanged: marker followed by the full row
    Whole { marker: Marker, row: &'a Row },
    /// Field-by-field reconciliation of a matched pair
    Modified(Vec<DeltaField<'a>>),
}

impl<'a> DeltaRow<'a> {
    pub fn added(row: &'a Row) -> Self {
        DeltaRow::Whole {
            marker: Marker::Added,
            row,
        }
    }

    pub fn removed(row: &'a Row) -> Self {
        DeltaRow::Whole {
            marker: Marker::Removed,
            row,
        }
    }

    pub fn unchanged(row: &'a Row) -> Self {
        DeltaRow::Whole {
            marker: Marker::Unchanged,
            row,
        }
    }

    pub fn marker(&self) -> Marker {
        match self {
            DeltaRow::Whole { marker, .. } => *marker,
            DeltaRow::Modified(_) => Marker::Modified,
        }
    }
}
