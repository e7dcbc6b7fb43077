//! Batch sources
//!
//! A batch is a text stream with one telecommand per line: whitespace
//! separated unsigned integers, the first being the command code. Sources
//! hand records to the runner one at a time, in file order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use telecmd_core::errors::ExError;
use telecmd_core::Record;

use crate::errors::{io_error, malformed_record, source_unavailable, Result};

/// Anything that yields telecommand records in order
///
/// `None` marks the end of the batch. An `Err` whose kind is fatal
/// (`SourceUnavailable`) halts processing; any other error is reported and
/// the runner asks for the next record.
pub trait BatchSource {
    fn next_record(&mut self) -> Option<std::result::Result<Record, ExError>>;
}

/// Split one batch line into a record
///
/// Returns `None` for blank lines. Fields after the command code are kept
/// as-is; the dispatcher decides how many it needs.
///
/// # Errors
///
/// Returns `MalformedRecord` if a token is not an unsigned 32-bit integer.
pub fn tokenize_line(line: usize, text: &str) -> Option<Result<Record>> {
    let mut tokens = text.split_whitespace().peekable();
    tokens.peek()?;

    let mut values = Vec::new();
    for token in tokens {
        match token.parse::<u32>() {
            Ok(value) => values.push(value),
            Err(e) => {
                return Some(Err(malformed_record(
                    line,
                    format!("token '{}' is not an unsigned integer: {}", token, e),
                )))
            }
        }
    }

    let code = values.remove(0);
    Some(Ok(Record::new(line, code, values)))
}

/// Line-oriented source over any buffered reader
pub struct LineSource<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> BatchSource for LineSource<R> {
    fn next_record(&mut self) -> Option<std::result::Result<Record, ExError>> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let text = match std::str::from_utf8(&self.buf) {
                        Ok(text) => text,
                        Err(e) => {
                            return Some(Err(malformed_record(
                                self.line,
                                format!("line is not valid UTF-8: {}", e),
                            )))
                        }
                    };
                    match tokenize_line(self.line, text) {
                        Some(record) => return Some(record),
                        None => tracing::debug!(line = self.line, "blank line skipped"),
                    }
                }
                Err(e) => {
                    // A reader that failed once is not read again
                    self.done = true;
                    return Some(Err(io_error("read_line", e).with_line(self.line + 1)));
                }
            }
        }
        None
    }
}

/// Batch file on disk
pub struct FileSource {
    path: PathBuf,
    lines: LineSource<BufReader<File>>,
}

impl FileSource {
    /// Open a batch file for reading
    ///
    /// # Errors
    ///
    /// Returns the fatal `SourceUnavailable` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| source_unavailable(path, e))?;
        tracing::debug!(path = %path.display(), "batch file opened");
        Ok(Self {
            path: path.to_path_buf(),
            lines: LineSource::new(BufReader::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BatchSource for FileSource {
    fn next_record(&mut self) -> Option<std::result::Result<Record, ExError>> {
        self.lines.next_record()
    }
}

/// In-memory source, mostly useful in tests and for embedding
impl BatchSource for std::vec::IntoIter<Record> {
    fn next_record(&mut self) -> Option<std::result::Result<Record, ExError>> {
        self.next().map(Ok)
    }
}
