//! Command-line interface for rowdelta

use crate::config::{DeltaFormat, DiffConfig};
use crate::error::Result;
use crate::output::SummaryFormat;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowdelta")]
#[command(about = "Reconcile two delimited text files by key and print the row delta")]
#[command(version)]
pub struct Cli {
    /// Reference input ("before"); `-` reads standard input
    pub file_a: PathBuf,

    /// Compared input ("after")
    pub file_b: PathBuf,

    /// Key field indexes, starting at 1 (e.g. "1" or "1,3")
    #[arg(short, long, value_parser = parse_field_list)]
    pub keys: FieldList,

    /// Field indexes excluded from comparison, starting at 1
    #[arg(short, long = "ignore", value_parser = parse_field_list)]
    pub ignore: Option<FieldList>,

    /// Field separator (one character, "\t" for tab); guessed when omitted
    #[arg(short, long, value_parser = parse_separator)]
    pub separator: Option<u8>,

    /// Inputs have no header row
    #[arg(short, long)]
    pub no_header: bool,

    /// Quoted field mode
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub quoted: bool,

    /// Delta display: "bold", "piped" or "newline" (or 0, 1, 2)
    #[arg(short, long, value_parser = DeltaFormat::parse)]
    pub format: Option<DeltaFormat>,

    /// Output common/unchanged rows
    #[arg(short, long)]
    pub common: bool,

    /// Write the delta to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Summary format: "pretty", "json"
    #[arg(long, default_value = "pretty", value_parser = SummaryFormat::parse)]
    pub summary: SummaryFormat,

    /// Show a progress spinner on stderr
    #[arg(long)]
    pub progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Comma-separated list of 1-based field indexes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList(pub Vec<usize>);

impl Cli {
    /// Build the engine configuration
    ///
    /// Without an explicit format, bold is only used when the delta goes to
    /// a terminal.
    pub fn to_config(&self, destination_is_terminal: bool) -> Result<DiffConfig> {
        let ignored = self.ignore.as_ref().map(|list| list.0.as_slice()).unwrap_or(&[]);
        let format = self.format.unwrap_or(if destination_is_terminal {
            DeltaFormat::Bold
        } else {
            DeltaFormat::Piped
        });

        let mut config = DiffConfig::new(&self.keys.0, ignored)?
            .with_separator(self.separator.unwrap_or(b','))
            .with_format(format)
            .with_header(!self.no_header)
            .with_unchanged(self.common);
        config.guess_separator = self.separator.is_none();
        config.quoted = self.quoted;
        Ok(config)
    }
}

/// Parse "1,3,4" into field indexes (1-based, non-zero)
fn parse_field_list(s: &str) -> std::result::Result<FieldList, String> {
    let indices = s
        .split(',')
        .map(|part| {
            let index: usize = part
                .trim()
                .parse()
                .map_err(|_| format!("Invalid field index ({})", part))?;
            if index == 0 {
                return Err("Field indexes start at 1".to_string());
            }
            Ok(index)
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;
    Ok(FieldList(indices))
}

/// Validate that the separator is a single byte
fn parse_separator(s: &str) -> std::result::Result<u8, String> {
    match s {
        "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 => Ok(s.as_bytes()[0]),
        _ => Err("Separator must be only one character long".to_string()),
    }
}
