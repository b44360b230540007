//! Row readers, delta writers and input opening

use crate::compare::DeltaEncoder;
use crate::config::DiffConfig;
use crate::delta::DeltaRow;
use crate::error::{Result, RowDeltaError};
use crate::Row;
use flate2::read::MultiGzDecoder;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

/// Separators considered when sniffing an input's first line
pub const CANDIDATE_SEPARATORS: [u8; 5] = [b',', b';', b'\t', b'|', b':'];

/// A lazy, finite source of rows
pub trait RowReader {
    /// Read the next row into `row`, reusing its storage
    ///
    /// Returns `false` once the stream is exhausted.
    fn read_row(&mut self, row: &mut Row) -> Result<bool>;
}

/// Receives classified delta rows in emission order
pub trait DeltaSink {
    fn emit(&mut self, delta: &DeltaRow<'_>) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Reads raw byte rows from delimited text
pub struct CsvRowReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CsvRowReader<R> {
    pub fn new(input: R, separator: u8, quoted: bool) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(separator)
            .quoting(quoted)
            .from_reader(input);
        Self { reader }
    }
}

impl<R: Read> RowReader for CsvRowReader<R> {
    fn read_row(&mut self, row: &mut Row) -> Result<bool> {
        Ok(self.reader.read_byte_record(row)?)
    }
}

/// Serves rows from memory, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryRowReader {
    rows: Vec<Row>,
    next: usize,
}

impl MemoryRowReader {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows, next: 0 }
    }

    /// Build from string fields, one inner slice per row
    pub fn from_fields(rows: &[&[&str]]) -> Self {
        Self::new(rows.iter().map(|fields| Row::from(fields.to_vec())).collect())
    }
}

impl RowReader for MemoryRowReader {
    fn read_row(&mut self, row: &mut Row) -> Result<bool> {
        match self.rows.get(self.next) {
            Some(next) => {
                row.clone_from(next);
                self.next += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Writes delta rows as delimited text, field bytes untouched
pub struct CsvDeltaWriter<W: Write> {
    writer: csv::Writer<W>,
    encoder: DeltaEncoder,
    scratch: Vec<u8>,
}

impl<W: Write> CsvDeltaWriter<W> {
    pub fn new(output: W, config: &DiffConfig) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(config.separator)
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(output);
        Self {
            writer,
            encoder: DeltaEncoder::from_config(config),
            scratch: Vec::new(),
        }
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| RowDeltaError::Io(e.into_error()))
    }
}

impl<W: Write> DeltaSink for CsvDeltaWriter<W> {
    fn emit(&mut self, delta: &DeltaRow<'_>) -> Result<()> {
        self.writer.write_field([delta.marker().as_byte()])?;
        match delta {
            DeltaRow::Whole { row, .. } => {
                for field in row.iter() {
                    self.writer.write_field(field)?;
                }
            }
            DeltaRow::Modified(fields) => {
                for field in fields {
                    self.encoder.encode_field(field, &mut self.scratch);
                    self.writer.write_field(&self.scratch)?;
                }
            }
        }
        self.writer.write_record(None::<&[u8]>)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every emitted delta as a rendered row (marker byte first)
#[derive(Debug, Clone)]
pub struct MemorySink {
    encoder: DeltaEncoder,
    pub rows: Vec<Row>,
}

impl MemorySink {
    pub fn new(config: &DiffConfig) -> Self {
        Self {
            encoder: DeltaEncoder::from_config(config),
            rows: Vec::new(),
        }
    }

    /// Rendered rows as UTF-8 strings, lossily
    pub fn lines(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect()
            })
            .collect()
    }
}

impl DeltaSink for MemorySink {
    fn emit(&mut self, delta: &DeltaRow<'_>) -> Result<()> {
        let mut rendered = Row::new();
        rendered.push_field(&[delta.marker().as_byte()]);
        match delta {
            DeltaRow::Whole { row, .. } => {
                for field in row.iter() {
                    rendered.push_field(field);
                }
            }
            DeltaRow::Modified(fields) => {
                let mut scratch = Vec::new();
                for field in fields {
                    self.encoder.encode_field(field, &mut scratch);
                    rendered.push_field(&scratch);
                }
            }
        }
        self.rows.push(rendered);
        Ok(())
    }
}

/// Open an input path; `-` is standard input and `.gz` files are decompressed
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(path).map_err(|e| RowDeltaError::input(path, e))?;
    let gzipped = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);
    if gzipped {
        debug!("Decompressing gzip input {}", path.display());
        Ok(Box::new(MultiGzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Open an input and wrap it in a row reader configured for this run
pub fn open_reader(path: &Path, config: &DiffConfig) -> Result<CsvRowReader<BufReader<Box<dyn Read>>>> {
    let mut input = BufReader::new(open_input(path)?);
    let separator = if config.guess_separator {
        let peeked = input.fill_buf().map_err(|e| RowDeltaError::input(path, e))?;
        let guessed = guess_separator(peeked).unwrap_or(config.separator);
        debug!(
            "Guessed separator {:?} for {}",
            guessed as char,
            path.display()
        );
        guessed
    } else {
        config.separator
    };
    Ok(CsvRowReader::new(input, separator, config.quoted))
}

/// Pick the most frequent candidate separator on the first line of `sample`
pub fn guess_separator(sample: &[u8]) -> Option<u8> {
    let first_line = sample
        .split(|&b| b == b'\n')
        .next()
        .unwrap_or_default();
    CANDIDATE_SEPARATORS
        .iter()
        .map(|&sep| (sep, first_line.iter().filter(|&&b| b == sep).count()))
        .filter(|&(_, count)| count > 0)
        // Earlier candidates win ties
        .fold(None, |best: Option<(u8, usize)>, (sep, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((sep, count)),
        })
        .map(|(sep, _)| sep)
}
