//! Command implementation for the rowdelta CLI

use crate::cli::Cli;
use crate::config::DiffConfig;
use crate::error::{Result, RowDeltaError};
use crate::io::{open_reader, CsvDeltaWriter};
use crate::output::report_summary;
use crate::progress::ProgressReporter;
use crate::reconcile::Reconciler;
use crate::summary::RunSummary;
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::Path;

/// Execute a diff described by parsed command-line arguments
pub fn execute_command(cli: &Cli) -> Result<RunSummary> {
    let to_terminal = cli.output.is_none() && io::stdout().is_terminal();
    let config = cli.to_config(to_terminal)?;
    debug!("Diff configuration: {}", serde_json::to_string(&config)?);
    let progress = if cli.progress {
        ProgressReporter::new_for_diff()?
    } else {
        ProgressReporter::new_minimal()
    };

    let summary = match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| RowDeltaError::input(path, e))?;
            debug!("Writing delta to {}", path.display());
            diff_files(&cli.file_a, &cli.file_b, &config, BufWriter::new(file), progress)?
        }
        None => diff_files(
            &cli.file_a,
            &cli.file_b,
            &config,
            BufWriter::new(io::stdout().lock()),
            progress,
        )?,
    };

    report_summary(&summary, cli.summary)?;
    Ok(summary)
}

/// Reconcile two input files, writing the delta stream to `output`
pub fn diff_files<W: Write>(
    file_a: &Path,
    file_b: &Path,
    config: &DiffConfig,
    output: W,
    progress: ProgressReporter,
) -> Result<RunSummary> {
    if file_a.as_os_str() == "-" && file_b.as_os_str() == "-" {
        return Err(RowDeltaError::invalid_input(
            "Only one input can be read from standard input",
        ));
    }

    let mut reader_a = open_reader(file_a, config)?;
    let mut reader_b = open_reader(file_b, config)?;
    let mut writer = CsvDeltaWriter::new(output, config);

    let summary = Reconciler::new(config)
        .with_progress(progress)
        .run(&mut reader_a, &mut reader_b, &mut writer)?;
    writer.into_inner()?;
    Ok(summary)
}
