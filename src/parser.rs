// src/parser.rs
//! Fixed-width batch file parser
//!
//! Layout, one record per line:
//!
//! ```text
//! line 1      header, at least 51 chars (content not inspected)
//! line 2..N   record, card number in chars [7, 26), trimmed
//! line N+1    footer, starts with "LOTE"; scanning stops here
//! ```
//!
//! Lines end at `\n`, `\r\n` or a lone `\r`. The input is read one line at a
//! time through a `BufRead`, and no line is buffered past the remaining size
//! allowance, so memory use does not grow with the file. Per-line problems never abort the scan; they
//! are counted in the returned [`ParseReport`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::consts::{
    BATCH_FILE_EXTENSION, CARD_NUMBER_END, CARD_NUMBER_START, FOOTER_SENTINEL,
    HEADER_MIN_LENGTH, RECORD_MIN_LENGTH,
};
use crate::error::CoreError;
use crate::CoreResult as Result;

/// A non-fatal problem with a single record line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordParseWarning {
    pub line: usize,
    pub reason: String,
}

/// Counters collected during one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Every line consumed, header and footer included
    pub lines_read: usize,
    pub valid: usize,
    /// Record lines shorter than the record width
    pub skipped_short: usize,
    /// Record lines whose card column was blank
    pub skipped_blank: usize,
    /// Record lines that could not be read at all
    pub invalid: usize,
    pub footer_line: Option<usize>,
    pub warnings: Vec<RecordParseWarning>,
}

/// Candidate card numbers in file order plus the scan report
#[derive(Debug, Clone)]
pub struct ParsedBatch {
    pub card_numbers: Vec<String>,
    pub report: ParseReport,
}

enum RecordLine {
    Footer,
    Short(usize),
    Blank,
    Card(String),
}

#[derive(Debug, Clone, Copy)]
pub struct BatchFileParser {
    max_file_size: u64,
}

impl BatchFileParser {
    pub fn new(config: &Config) -> Self {
        Self::with_max_file_size(config.upload.max_file_size)
    }

    pub fn with_max_file_size(max_file_size: u64) -> Self {
        BatchFileParser { max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Parse a batch file on disk, streaming it line by line
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedBatch> {
        let path = path.as_ref();
        let size = std::fs::metadata(path).map_err(missing_as_empty)?.len();
        self.validate_size(size)?;

        let has_txt_extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(BATCH_FILE_EXTENSION))
            .unwrap_or(false);
        if !has_txt_extension {
            warn!(path = %path.display(), "file extension is not .txt, processing anyway");
        }

        self.scan(BufReader::new(File::open(path).map_err(missing_as_empty)?))
    }

    /// Parse an in-memory upload
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedBatch> {
        self.parse_reader(bytes, bytes.len() as u64)
    }

    /// Parse any buffered stream whose size is known up front
    pub fn parse_reader<R: BufRead>(&self, reader: R, declared_size: u64) -> Result<ParsedBatch> {
        self.validate_size(declared_size)?;
        self.scan(reader)
    }

    /// Size checks that must pass before a single line is read
    fn validate_size(&self, declared_size: u64) -> Result<()> {
        if declared_size == 0 {
            return Err(CoreError::EmptyInput);
        }
        if declared_size > self.max_file_size {
            return Err(CoreError::FileTooLarge {
                size: declared_size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    // The declared size is only a claim; the stream has the last word
    fn check_streamed(&self, bytes_read: u64) -> Result<()> {
        if bytes_read > self.max_file_size {
            return Err(CoreError::FileTooLarge {
                size: bytes_read,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    fn remaining(&self, bytes_read: u64) -> u64 {
        self.max_file_size.saturating_sub(bytes_read)
    }

    fn scan<R: BufRead>(&self, mut reader: R) -> Result<ParsedBatch> {
        let mut buf = Vec::new();
        let mut line_number = 1usize;

        let mut bytes_read = read_line(&mut reader, &mut buf, self.remaining(0))?;
        self.check_streamed(bytes_read)?;
        let header_len = String::from_utf8_lossy(&buf)
            .chars()
            .count();
        if header_len < HEADER_MIN_LENGTH {
            return Err(CoreError::InvalidHeader {
                line: line_number,
                expected: HEADER_MIN_LENGTH,
                actual: header_len,
            });
        }

        let mut report = ParseReport {
            lines_read: 1,
            ..ParseReport::default()
        };
        let mut card_numbers = Vec::new();

        loop {
            buf.clear();
            let n = read_line(&mut reader, &mut buf, self.remaining(bytes_read))?;
            if n == 0 {
                break;
            }
            bytes_read += n;
            self.check_streamed(bytes_read)?;
            line_number += 1;
            report.lines_read += 1;

            match classify(&buf) {
                Ok(RecordLine::Footer) => {
                    info!(line = line_number, "footer found, stopping processing");
                    report.footer_line = Some(line_number);
                    break;
                }
                Ok(RecordLine::Short(length)) => {
                    warn!(line = line_number, length, "line is too short, skipping");
                    report.skipped_short += 1;
                }
                Ok(RecordLine::Blank) => {
                    report.skipped_blank += 1;
                }
                Ok(RecordLine::Card(number)) => {
                    card_numbers.push(number);
                    report.valid += 1;
                }
                Err(reason) => {
                    warn!(line = line_number, %reason, "failed to parse card line");
                    report.invalid += 1;
                    report.warnings.push(RecordParseWarning {
                        line: line_number,
                        reason,
                    });
                }
            }
        }

        info!(
            valid = report.valid,
            invalid = report.invalid,
            skipped = report.skipped_short + report.skipped_blank,
            lines = report.lines_read,
            "file processing completed"
        );

        if card_numbers.is_empty() {
            return Err(CoreError::EmptyBatch);
        }
        Ok(ParsedBatch {
            card_numbers,
            report,
        })
    }
}

fn classify(line: &[u8]) -> std::result::Result<RecordLine, String> {
    if line.starts_with(FOOTER_SENTINEL.as_bytes()) {
        return Ok(RecordLine::Footer);
    }

    let line = std::str::from_utf8(line).map_err(|e| format!("not valid UTF-8: {e}"))?;
    let length = line.chars().count();
    if length < RECORD_MIN_LENGTH {
        return Ok(RecordLine::Short(length));
    }

    let number: String = line
        .chars()
        .skip(CARD_NUMBER_START)
        .take(CARD_NUMBER_END - CARD_NUMBER_START)
        .collect();
    let number = number.trim();
    if number.is_empty() {
        return Ok(RecordLine::Blank);
    }
    Ok(RecordLine::Card(number.to_owned()))
}

fn missing_as_empty(err: io::Error) -> CoreError {
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::EmptyInput
    } else {
        CoreError::Io(err)
    }
}

/// Read one line into `buf` without its terminator and return the bytes
/// consumed, terminator included. Gives up once more than `allowance` bytes
/// have been taken, so the caller can reject the stream.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, allowance: u64) -> io::Result<u64> {
    let mut consumed = 0u64;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(consumed);
        }
        let budget = allowance.saturating_sub(consumed).saturating_add(1);
        let window = &available[..available.len().min(usize::try_from(budget).unwrap_or(usize::MAX))];

        match window.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) => {
                let ends_with_cr = window[i] == b'\r';
                buf.extend_from_slice(&window[..i]);
                reader.consume(i + 1);
                consumed += (i + 1) as u64;
                if ends_with_cr && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                    consumed += 1;
                }
                return Ok(consumed);
            }
            None => {
                let n = window.len();
                buf.extend_from_slice(window);
                reader.consume(n);
                consumed += n as u64;
                if consumed > allowance {
                    return Ok(consumed);
                }
            }
        }
    }
}
