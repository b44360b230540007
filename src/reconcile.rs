//! Streaming reconciliation of two row sources by key
//!
//! Both inputs are read in lockstep. Rows whose keys line up are compared
//! directly; otherwise each row first looks for its counterpart in the other
//! side's pending cache and, failing that, waits in its own side's cache.
//! Whatever is still pending once both inputs end is reported as removed
//! (first input) or added (second input).

use crate::cache::{PendingMatchCache, Side};
use crate::compare::compare;
use crate::config::DiffConfig;
use crate::delta::DeltaRow;
use crate::error::{Result, RowDeltaError};
use crate::hash::KeyHasher;
use crate::io::{DeltaSink, RowReader};
use crate::progress::ProgressReporter;
use crate::summary::RunSummary;
use crate::Row;
use log::{debug, warn};

/// Drives one reconciliation run and owns all of its mutable state
pub struct Reconciler<'c> {
    config: &'c DiffConfig,
    hasher: KeyHasher,
    cache_a: PendingMatchCache,
    cache_b: PendingMatchCache,
    summary: RunSummary,
    header_captured: bool,
    progress: ProgressReporter,
}

impl<'c> Reconciler<'c> {
    pub fn new(config: &'c DiffConfig) -> Self {
        Self::with_caches(
            config,
            PendingMatchCache::new(Side::A),
            PendingMatchCache::new(Side::B),
        )
    }

    /// Start from caches supplied by the caller, which may already hold rows
    pub fn with_caches(
        config: &'c DiffConfig,
        cache_a: PendingMatchCache,
        cache_b: PendingMatchCache,
    ) -> Self {
        Self {
            config,
            hasher: KeyHasher::new(),
            cache_a,
            cache_b,
            summary: RunSummary::default(),
            header_captured: false,
            progress: ProgressReporter::new_minimal(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    /// Reconcile both inputs completely, writing every outcome to `sink`
    pub fn run<A, B, S>(mut self, reader_a: &mut A, reader_b: &mut B, sink: &mut S) -> Result<RunSummary>
    where
        A: RowReader,
        B: RowReader,
        S: DeltaSink,
    {
        let mut row_a = Row::new();
        let mut row_b = Row::new();
        let mut eof_a = false;
        let mut eof_b = false;

        loop {
            eof_a = eof_a || !reader_a.read_row(&mut row_a)?;
            eof_b = eof_b || !reader_b.read_row(&mut row_b)?;

            match (eof_a, eof_b) {
                (true, true) => break,
                (false, false) => self.step(Some(&row_a), Some(&row_b), sink)?,
                (false, true) => self.step(Some(&row_a), None, sink)?,
                (true, false) => self.step(None, Some(&row_b), sink)?,
            }
            self.progress.update_rows(self.summary.total);
        }

        self.drain(sink)?;
        sink.flush()?;
        self.progress.finish_rows(self.summary.total);

        debug!(
            "Reconciled {} steps: {} added, {} removed, {} modified, {} unchanged, {} duplicate keys",
            self.summary.total,
            self.summary.added,
            self.summary.removed,
            self.summary.modified,
            self.summary.unchanged,
            self.summary.duplicates
        );
        Ok(self.summary)
    }

    fn step<S: DeltaSink>(&mut self, row_a: Option<&Row>, row_b: Option<&Row>, sink: &mut S) -> Result<()> {
        self.summary.total += 1;
        let first = !self.header_captured;

        for (row, side) in [(row_a, Side::A), (row_b, Side::B)] {
            if let Some(row) = row {
                self.check_keys(row, side)?;
                if first {
                    self.check_ignored(row, side)?;
                }
            }
        }

        match (row_a, row_b) {
            (Some(row_a), Some(row_b)) => {
                let hash_a = self.hasher.hash(row_a, &self.config.keys);
                let hash_b = self.hasher.hash(row_b, &self.config.keys);
                if hash_a == hash_b {
                    return self.reconcile_pair(row_a, row_b, sink);
                }

                if first {
                    self.capture_header(row_a);
                }
                match self.cache_b.take(hash_a) {
                    Some(cached_b) => self.reconcile_pair(row_a, &cached_b, sink)?,
                    None => self.park(Side::A, hash_a, row_a),
                }
                match self.cache_a.take(hash_b) {
                    Some(cached_a) => self.reconcile_pair(&cached_a, row_b, sink)?,
                    None => self.park(Side::B, hash_b, row_b),
                }
                Ok(())
            }
            (Some(row_a), None) => {
                if first {
                    self.capture_header(row_a);
                }
                let hash_a = self.hasher.hash(row_a, &self.config.keys);
                match self.cache_b.take(hash_a) {
                    Some(cached_b) => self.reconcile_pair(row_a, &cached_b, sink),
                    None => {
                        // The second input is exhausted, so nothing can match later
                        self.summary.removed += 1;
                        sink.emit(&DeltaRow::removed(row_a))
                    }
                }
            }
            (None, Some(row_b)) => {
                if first {
                    self.capture_header(row_b);
                }
                let hash_b = self.hasher.hash(row_b, &self.config.keys);
                match self.cache_a.take(hash_b) {
                    Some(cached_a) => self.reconcile_pair(&cached_a, row_b, sink),
                    None => {
                        self.summary.added += 1;
                        sink.emit(&DeltaRow::added(row_b))
                    }
                }
            }
            (None, None) => Ok(()),
        }
    }

    /// Compare two rows known to share a key and emit the outcome
    fn reconcile_pair<S: DeltaSink>(&mut self, row_a: &Row, row_b: &Row, sink: &mut S) -> Result<()> {
        let first = !self.header_captured;
        if first {
            self.header_captured = true;
            self.summary
                .modified_fields
                .resize(row_a.len().max(row_b.len()));
        }

        match compare(row_a, row_b, self.config, &mut self.summary.modified_fields) {
            None => {
                self.summary.unchanged += 1;
                if first && self.config.has_header {
                    self.summary.header = Some(row_a.clone());
                }
                if self.config.emit_unchanged || (first && self.config.has_header) {
                    sink.emit(&DeltaRow::unchanged(row_a))?;
                }
            }
            Some(fields) => {
                self.summary.modified += 1;
                if first && self.config.has_header {
                    let mut header = Row::new();
                    for field in &fields {
                        header.push_field(field.surviving());
                    }
                    self.summary.header = Some(header);
                }
                sink.emit(&DeltaRow::Modified(fields))?;
            }
        }
        Ok(())
    }

    /// Record the reference row of the first step as the header
    fn capture_header(&mut self, row: &Row) {
        self.header_captured = true;
        self.summary.modified_fields.resize(row.len());
        if self.config.has_header {
            self.summary.header = Some(row.clone());
        }
    }

    /// Hold an unmatched row until its counterpart shows up
    fn park(&mut self, side: Side, hash: crate::hash::RowHash, row: &Row) {
        let cache = match side {
            Side::A => &mut self.cache_a,
            Side::B => &mut self.cache_b,
        };
        if cache.put(hash, row.clone()) {
            self.summary.duplicates += 1;
            warn!(
                "Duplicate row/key in {} input: {}",
                cache.side().ordinal(),
                display_row(row, self.config.separator)
            );
        }
    }

    fn drain<S: DeltaSink>(&mut self, sink: &mut S) -> Result<()> {
        for row in self.cache_a.drain() {
            self.summary.removed += 1;
            sink.emit(&DeltaRow::removed(&row))?;
        }
        for row in self.cache_b.drain() {
            self.summary.added += 1;
            sink.emit(&DeltaRow::added(&row))?;
        }
        Ok(())
    }

    fn check_keys(&self, row: &Row, side: Side) -> Result<()> {
        match self.config.keys.iter().find(|&&key| key >= row.len()) {
            Some(key) => Err(RowDeltaError::config(format!(
                "Key index {} out of range in {} input",
                key + 1,
                side.ordinal()
            ))),
            None => Ok(()),
        }
    }

    /// Only applied to the first step; later rows may be shorter than an
    /// ignored position, which is then left blank in the delta
    fn check_ignored(&self, row: &Row, side: Side) -> Result<()> {
        match self.config.ignored.iter().find(|&&field| field >= row.len()) {
            Some(field) => Err(RowDeltaError::config(format!(
                "Ignored field {} out of range in {} input",
                field + 1,
                side.ordinal()
            ))),
            None => Ok(()),
        }
    }
}

fn display_row(row: &Row, separator: u8) -> String {
    let separator = (separator as char).to_string();
    row.iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect::<Vec<_>>()
        .join(&separator)
}
