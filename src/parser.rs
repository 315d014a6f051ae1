//! Transcript parsing: classify lines and assemble them into records.
//!
//! The whole parse is one left-to-right scan carrying a single piece of
//! state, the currently open message. [`Assembler`] holds that state and
//! is shared by the in-memory path ([`TranscriptParser::parse_str`]) and
//! the incremental path ([`RecordIterator`]), so both produce the same
//! segmentation.
//!
//! | Line | No open message | Open message |
//! |------|-----------------|--------------|
//! | header | open new | emit open, open new |
//! | blank | ignore | ignore |
//! | other | emit orphan system record | append to open |
//!
//! At end of input the open message, if any, is emitted.
//!
//! # Example
//!
//! ```rust
//! use chatarchive::parser::parse_transcript;
//!
//! let text = "1/1/24, 9:00 - A: first line\nsecond line\n\n1/1/24, 9:05 - B: next";
//! let records = parse_transcript(text);
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].content, "first line\nsecond line");
//! assert_eq!(records[1].sender, "B");
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ParserConfig;
use crate::error::{ArchiveError, Result};
use crate::parsing::{Attribution, match_header, split_sender};
use crate::record::MessageRecord;

/// Counts of how each input line was classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines that opened a new message.
    pub header_lines: usize,
    /// Lines appended to an open message.
    pub continuation_lines: usize,
    /// Non-blank lines seen with no open message.
    pub orphan_lines: usize,
    /// Empty or whitespace-only lines.
    pub blank_lines: usize,
}

impl ParseStats {
    /// Number of records these lines produce.
    pub fn records(&self) -> usize {
        self.header_lines + self.orphan_lines
    }

    /// Total number of lines consumed.
    pub fn total_lines(&self) -> usize {
        self.header_lines + self.continuation_lines + self.orphan_lines + self.blank_lines
    }
}

/// Line-by-line record assembler.
///
/// Feed lines (without their line terminator) to [`push_line`](Self::push_line)
/// and call [`finish`](Self::finish) at end of input.
#[derive(Debug)]
pub struct Assembler {
    colon_limit: usize,
    open: Option<MessageRecord>,
    stats: ParseStats,
}

impl Assembler {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            colon_limit: config.sender_colon_limit,
            open: None,
            stats: ParseStats::default(),
        }
    }

    /// Consumes one line, returning a record if one was completed.
    ///
    /// A line completes at most one record: either the previously open
    /// message (when a header arrives) or an orphan.
    pub fn push_line(&mut self, line: &str) -> Option<MessageRecord> {
        if let Some(header) = match_header(line) {
            self.stats.header_lines += 1;
            let record = match split_sender(header.remainder, self.colon_limit) {
                Attribution::User { sender, content } => {
                    MessageRecord::user(header.timestamp, sender, content, line)
                }
                Attribution::System { content } => {
                    MessageRecord::system(header.timestamp, content, line)
                }
            };
            return self.open.replace(record);
        }

        if line.trim().is_empty() {
            self.stats.blank_lines += 1;
            return None;
        }

        match self.open.as_mut() {
            Some(open) => {
                self.stats.continuation_lines += 1;
                open.append_line(line);
                None
            }
            None => {
                self.stats.orphan_lines += 1;
                Some(MessageRecord::system(orphan_timestamp(), line, line))
            }
        }
    }

    /// Emits the open message, if any. Calling it again returns `None`.
    pub fn finish(&mut self) -> Option<MessageRecord> {
        self.open.take()
    }

    /// Returns `true` while a message is being accumulated.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

/// Orphans carry no date of their own; they are stamped with the current
/// local time.
fn orphan_timestamp() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parses a transcript with the default configuration.
///
/// Pure: no I/O, no store. Lines are separated by `\n`; normalizing other
/// line endings is up to the caller.
pub fn parse_transcript(text: &str) -> Vec<MessageRecord> {
    TranscriptParser::new().parse_str(text)
}

/// Transcript parser with configuration.
///
/// # Example
///
/// ```rust
/// use chatarchive::config::ParserConfig;
/// use chatarchive::parser::TranscriptParser;
///
/// let parser = TranscriptParser::with_config(ParserConfig::new().with_sender_colon_limit(4));
/// let records = parser.parse_str("1/1/24, 9:00 - Alice: hi");
///
/// // "Alice" is 5 characters, past the limit of 4.
/// assert!(records[0].is_system);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: ParserConfig,
}

impl TranscriptParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an in-memory transcript.
    pub fn parse_str(&self, text: &str) -> Vec<MessageRecord> {
        self.parse_str_with_stats(text).0
    }

    /// Parses an in-memory transcript and reports line classification.
    pub fn parse_str_with_stats(&self, text: &str) -> (Vec<MessageRecord>, ParseStats) {
        let mut assembler = Assembler::new(&self.config);
        let mut records = Vec::new();

        for line in text.split('\n') {
            records.extend(assembler.push_line(line));
        }
        records.extend(assembler.finish());

        let stats = assembler.stats();
        info!(
            records = records.len(),
            headers = stats.header_lines,
            continuations = stats.continuation_lines,
            orphans = stats.orphan_lines,
            "parsed transcript"
        );

        (records, stats)
    }

    /// Reads and parses a transcript file.
    ///
    /// Uses the incremental reader when the configuration enables streaming.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<MessageRecord>> {
        if self.config.streaming {
            return self.stream_file(path)?.collect();
        }
        let text = read_transcript(path)?;
        Ok(self.parse_str(&text))
    }

    /// Parses records incrementally from any buffered reader.
    pub fn stream<R: BufRead>(&self, reader: R) -> RecordIterator<R> {
        RecordIterator::new(reader, &self.config, PathBuf::from("<stream>"), None)
    }

    /// Opens a transcript file for incremental parsing.
    pub fn stream_file(&self, path: &Path) -> Result<RecordIterator<BufReader<File>>> {
        let file = File::open(path).map_err(|e| ArchiveError::input(path, e))?;
        let total = file.metadata().ok().map(|m| m.len());
        let reader = BufReader::with_capacity(self.config.buffer_size, file);

        debug!(path = %path.display(), total_bytes = ?total, "streaming transcript");
        Ok(RecordIterator::new(reader, &self.config, path.to_path_buf(), total))
    }
}

/// Reads a transcript file as UTF-8, normalizing `\r\n` to `\n`.
///
/// Any failure here, including invalid UTF-8, is an input-acquisition error.
pub fn read_transcript(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| ArchiveError::input(path, e))?;
    if text.contains('\r') {
        Ok(text.replace("\r\n", "\n"))
    } else {
        Ok(text)
    }
}

/// Iterator yielding records as lines are read.
///
/// Holds only the open message between lines.
pub struct RecordIterator<R: BufRead> {
    reader: R,
    assembler: Assembler,
    line: String,
    origin: PathBuf,
    bytes_read: u64,
    total_bytes: Option<u64>,
    finished: bool,
}

impl<R: BufRead> RecordIterator<R> {
    fn new(reader: R, config: &ParserConfig, origin: PathBuf, total_bytes: Option<u64>) -> Self {
        Self {
            reader,
            assembler: Assembler::new(config),
            line: String::new(),
            origin,
            bytes_read: 0,
            total_bytes,
            finished: false,
        }
    }

    /// Returns approximate progress as a percentage (0.0 to 100.0).
    pub fn progress(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_read as f64 / total as f64) * 100.0
            }
        })
    }

    /// Returns the number of bytes consumed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Returns the total input size in bytes, if known.
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Line classification so far.
    pub fn stats(&self) -> ParseStats {
        self.assembler.stats()
    }
}

impl<R: BufRead> Iterator for RecordIterator<R> {
    type Item = Result<MessageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    self.finished = true;
                    return self.assembler.finish().map(Ok);
                }
                Ok(n) => {
                    self.bytes_read += n as u64;
                    if let Some(record) = self.assembler.push_line(strip_line_ending(&self.line)) {
                        return Some(Ok(record));
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(ArchiveError::input(self.origin.clone(), e)));
                }
            }
        }
        None
    }
}

/// Drops a trailing `\n`, and a `\r` directly before it.
fn strip_line_ending(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}
