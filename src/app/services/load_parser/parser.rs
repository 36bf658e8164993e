//! Core load file reader
//!
//! Walks the raw load export one physical line at a time and hands each line
//! to a `csv` reader configured for the export: a configurable delimiter and
//! rows that may carry extra trailing columns. Driving the lines here keeps
//! line numbers exact and makes a blank row visible; a `csv` reader over the
//! whole file would skip it silently.

use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines, Read};
use std::path::Path;
use tracing::{debug, info};

use super::field_parsers::parse_reading;
use crate::app::models::Reading;
use crate::config::ExtractionConfig;
use crate::constants::MIN_SOURCE_FIELDS;
use crate::{Error, Result};

/// Lazy reader producing one [`Reading`] per data row, in file order
///
/// The first line is the header and is skipped unread. The first error
/// ends iteration: a malformed row is fatal for the run, so nothing after
/// it is parsed.
pub struct LoadCsvReader<R: Read> {
    lines: Lines<BufReader<R>>,
    row_format: ReaderBuilder,
    file: String,
    sentinel: String,
    line: u64,
    rows_read: u64,
    failed: bool,
}

impl LoadCsvReader<File> {
    /// Open a load file from disk (read-only)
    pub fn open(path: &Path, config: &ExtractionConfig) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::io(format!("Failed to open source file {}", path.display()), e)
        })?;
        info!("Reading load file: {}", path.display());
        Ok(Self::from_reader(file, path.display().to_string(), config))
    }
}

impl<R: Read> LoadCsvReader<R> {
    /// Wrap any reader; `label` names the source in error messages
    ///
    /// Fields are trimmed before the sentinel and number checks, so `" ? "`
    /// reads as missing.
    pub fn from_reader(reader: R, label: impl Into<String>, config: &ExtractionConfig) -> Self {
        let mut row_format = ReaderBuilder::new();
        row_format
            .delimiter(config.delimiter_byte())
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All);

        Self {
            lines: BufReader::new(reader).lines(),
            row_format,
            file: label.into(),
            sentinel: config.missing_sentinel.clone(),
            line: 0,
            rows_read: 0,
            failed: false,
        }
    }

    /// Number of data rows successfully parsed so far
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    fn fail(&mut self, message: impl Into<String>) -> Option<Result<Reading>> {
        self.failed = true;
        let error = Error::parse(self.file.clone(), self.line, message);
        debug!("{}", error);
        Some(Err(error))
    }

    fn read_failed(&mut self, e: std::io::Error) -> Option<Result<Reading>> {
        if e.kind() == ErrorKind::InvalidData {
            return self.fail(format!("Line is not valid UTF-8: {}", e));
        }
        self.failed = true;
        let message = format!("Failed to read source file {}", self.file);
        Some(Err(Error::io(message, e)))
    }

    fn next_line(&mut self) -> Option<std::io::Result<String>> {
        let next = self.lines.next()?;
        self.line += 1;
        Some(next)
    }

    fn parse_line(&mut self, text: &str) -> Option<Result<Reading>> {
        if text.trim().is_empty() {
            return self.fail(format!(
                "Expected at least {} fields, found 0 (blank line)",
                MIN_SOURCE_FIELDS
            ));
        }

        let record = match self.row_format.from_reader(text.as_bytes()).records().next() {
            Some(Ok(record)) => record,
            Some(Err(e)) => return self.fail(format!("CSV read failed: {}", e)),
            None => {
                return self.fail(format!(
                    "Expected at least {} fields, found 0",
                    MIN_SOURCE_FIELDS
                ));
            }
        };

        match parse_reading(&record, &self.sentinel, self.line) {
            Ok(reading) => {
                self.rows_read += 1;
                Some(Ok(reading))
            }
            Err(message) => self.fail(message),
        }
    }
}

impl<R: Read> Iterator for LoadCsvReader<R> {
    type Item = Result<Reading>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if self.line == 0 {
            match self.next_line()? {
                Ok(_header) => {}
                Err(e) => return self.read_failed(e),
            }
        }

        match self.next_line()? {
            Ok(text) => self.parse_line(&text),
            Err(e) => self.read_failed(e),
        }
    }
}
