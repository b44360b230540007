//! End-of-run reporting on the diagnostics channel

use crate::error::Result;
use crate::summary::RunSummary;
use std::io::Write;

/// How the run summary is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    Pretty,
    Json,
}

impl SummaryFormat {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid summary format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Pretty printer for the run summary
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Write counters and modified fields; nothing when the inputs reconcile
    pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> Result<()> {
        if !summary.has_differences() {
            return Ok(());
        }
        writeln!(
            out,
            "Total: {}, Removed: {}, Added: {}, Modified: {}",
            summary.total, summary.removed, summary.added, summary.modified
        )?;
        if summary.modified > 0 {
            writeln!(out, "Modified fields: {}", summary.modified_field_labels().join(", "))?;
        }
        Ok(())
    }
}

/// JSON formatter for the run summary
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, summary)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Report the summary to stderr in the requested format
pub fn report_summary(summary: &RunSummary, format: SummaryFormat) -> Result<()> {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        SummaryFormat::Pretty => PrettyPrinter::write_summary(&mut out, summary),
        SummaryFormat::Json => JsonFormatter::write_summary(&mut out, summary),
    }
}
