//! Bulk loading of `key ; value` lines into a [`LookupIndex`].

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::field::parse_trimmed;
use crate::reporter::{Reporter, TracingReporter};
use crate::{Field, FieldError, LookupIndex, Record};

/// The default field separator.
pub const DEFAULT_SEPARATOR: char = ';';

/// Error raised when a source cannot be loaded at all.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened.
    #[error("Failed to open `{}`", path.display())]
    Open {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    /// Reading from the source failed part way through.
    #[error("Failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        error: io::Error,
    },
}

/// Why a single line was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("Missing `{separator}` separator")]
    MissingSeparator { separator: char, text: Box<str> },
    #[error("Line is not valid UTF-8")]
    Encoding,
    #[error("Bad key")]
    Key(#[source] FieldError),
    #[error("Bad value")]
    Value(#[source] FieldError),
}

/// Summary of a completed load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Records added to the index.
    pub loaded: usize,
    /// Lines skipped because they were malformed.
    pub skipped: usize,
}

/// Parses delimited text into records and adds them to an index.
///
/// Blank lines are ignored. Any other line which does not produce a record
/// is reported as a warning and skipped.
pub struct TextLoader<R = TracingReporter> {
    reporter: R,
    separator: char,
}

impl TextLoader {
    /// Construct a loader which reports through `tracing`.
    pub const fn new() -> Self {
        Self {
            reporter: TracingReporter,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl Default for TextLoader {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<R> TextLoader<R>
where
    R: Reporter,
{
    /// Use a different reporter.
    pub fn with_reporter<T>(self, reporter: T) -> TextLoader<T>
    where
        T: Reporter,
    {
        TextLoader {
            reporter,
            separator: self.separator,
        }
    }

    /// Use a different field separator.
    pub fn with_separator(self, separator: char) -> Self {
        Self { separator, ..self }
    }

    /// Parse a single line.
    ///
    /// Returns `Ok(None)` for blank lines. Both fields must parse for a
    /// record to be produced.
    pub fn parse_line<K, V>(&self, line: &str) -> Result<Option<Record<K, V>>, LineError>
    where
        K: Field,
        V: Field,
    {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let Some((key, value)) = line.split_once(self.separator) else {
            return Err(LineError::MissingSeparator {
                separator: self.separator,
                text: line.trim().into(),
            });
        };

        let key = parse_trimmed(key).map_err(LineError::Key)?;
        let value = parse_trimmed(value).map_err(LineError::Value)?;
        Ok(Some(Record::new(key, value)))
    }

    /// Load every line of `input`.
    pub fn load_str<K, V>(&self, index: &mut LookupIndex<K, V>, input: &str) -> LoadReport
    where
        K: Field + Ord + Clone,
        V: Field + Ord,
    {
        let mut report = LoadReport::default();

        for (n, line) in input.lines().enumerate() {
            self.load_line(index, n + 1, line, &mut report);
        }

        self.reporter.loaded(&report);
        report
    }

    /// Load every line from a buffered reader.
    ///
    /// Lines which are not valid UTF-8 are skipped. An I/O error aborts the
    /// load, leaving records read so far in the index.
    pub fn load_reader<K, V, B>(
        &self,
        index: &mut LookupIndex<K, V>,
        mut reader: B,
    ) -> Result<LoadReport, LoadError>
    where
        K: Field + Ord + Clone,
        V: Field + Ord,
        B: BufRead,
    {
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        let mut line = 0;

        loop {
            buf.clear();
            line += 1;

            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|error| LoadError::Read { line, error })?;

            if n == 0 {
                break;
            }

            let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);

            match str::from_utf8(bytes) {
                Ok(text) => self.load_line(index, line, text, &mut report),
                Err(..) => {
                    self.reporter.skipped(line, &LineError::Encoding);
                    report.skipped += 1;
                }
            }
        }

        self.reporter.loaded(&report);
        Ok(report)
    }

    /// Load the file at `path`.
    ///
    /// Files with a `.gz` extension are decompressed while reading.
    pub fn load_path<K, V, P>(
        &self,
        index: &mut LookupIndex<K, V>,
        path: P,
    ) -> Result<LoadReport, LoadError>
    where
        K: Field + Ord + Clone,
        V: Field + Ord,
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        let file = File::open(path).map_err(|error| LoadError::Open {
            path: path.to_owned(),
            error,
        })?;

        tracing::debug!(path = ?path, "Loading records");

        if path.extension() == Some("gz".as_ref()) {
            self.load_reader(index, BufReader::new(GzDecoder::new(file)))
        } else {
            self.load_reader(index, BufReader::new(file))
        }
    }

    fn load_line<K, V>(
        &self,
        index: &mut LookupIndex<K, V>,
        n: usize,
        line: &str,
        report: &mut LoadReport,
    ) where
        K: Field + Ord + Clone,
        V: Field + Ord,
    {
        match self.parse_line(line) {
            Ok(Some(record)) => {
                index.add_record(record);
                report.loaded += 1;
            }
            Ok(None) => {}
            Err(error) => {
                self.reporter.skipped(n, &error);
                report.skipped += 1;
            }
        }
    }
}
