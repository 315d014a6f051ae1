//! Chunked persistence of parsed records.
//!
//! Records are written to a [`MessageStore`] in consecutive chunks
//! (default 1000), strictly in order and one at a time. The first chunk
//! the store rejects ends the run: later chunks are never attempted and
//! the error reports how many records earlier chunks committed.
//!
//! Imports are not idempotent. Running the same import twice stores every
//! record twice.
//!
//! # Example
//!
//! ```rust
//! use chatarchive::import::Importer;
//! use chatarchive::store::MemoryStore;
//!
//! let mut importer = Importer::new(MemoryStore::new());
//! let summary = importer.import_str("1/1/24, 9:00 - A: hi\n1/1/24, 9:01 - B: hey")?;
//!
//! assert_eq!(summary.records_inserted, 2);
//! assert_eq!(importer.store().len(), 2);
//! # Ok::<(), chatarchive::ArchiveError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::ImportConfig;
use crate::error::{ArchiveError, Result};
use crate::parser::TranscriptParser;
use crate::progress::{Progress, ProgressCallback, no_progress};
use crate::record::MessageRecord;
use crate::store::MessageStore;

/// Writes `records` to `store` in chunks of `chunk_size`.
///
/// Returns the number of records written. A `chunk_size` of 0 is treated
/// as 1.
///
/// # Errors
///
/// [`ArchiveError::Store`] with the count committed before the failing
/// chunk.
pub fn write_in_chunks<S>(store: &mut S, records: &[MessageRecord], chunk_size: usize) -> Result<usize>
where
    S: MessageStore + ?Sized,
{
    write_chunks_reporting(store, records, chunk_size, &no_progress())
}

fn write_chunks_reporting<S>(
    store: &mut S,
    records: &[MessageRecord],
    chunk_size: usize,
    progress: &ProgressCallback,
) -> Result<usize>
where
    S: MessageStore + ?Sized,
{
    let chunk_size = chunk_size.max(1);
    let total = records.len();
    let mut inserted = 0;

    for (index, chunk) in records.chunks(chunk_size).enumerate() {
        let number = index + 1;
        debug!(
            store = store.name(),
            chunk = number,
            from = inserted,
            to = inserted + chunk.len(),
            "writing chunk"
        );

        if let Err(source) = store.insert_batch(chunk) {
            error!(chunk = number, inserted, error = %source, "chunk write failed");
            return Err(ArchiveError::store(inserted, source));
        }

        inserted += chunk.len();
        progress(Progress::new(inserted, total, number));
    }

    Ok(inserted)
}

/// Result of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Records written to the store.
    pub records_inserted: usize,

    /// Store write calls made.
    pub chunks_written: usize,

    /// The first few parsed records.
    pub preview: Vec<MessageRecord>,
}

/// Parses transcripts and writes them to a store.
pub struct Importer<S: MessageStore> {
    store: S,
    parser: TranscriptParser,
    config: ImportConfig,
    progress: ProgressCallback,
}

impl<S: MessageStore> Importer<S> {
    /// Creates an importer with default parser and import settings.
    pub fn new(store: S) -> Self {
        Self {
            store,
            parser: TranscriptParser::new(),
            config: ImportConfig::default(),
            progress: no_progress(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_parser(mut self, parser: TranscriptParser) -> Self {
        self.parser = parser;
        self
    }

    /// Sets a callback invoked after every chunk written.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Writes already-parsed records.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::NoMessages`] if `records` is empty, otherwise
    /// [`ArchiveError::Store`] on the first rejected chunk.
    pub fn import_records(&mut self, records: &[MessageRecord]) -> Result<ImportSummary> {
        if records.is_empty() {
            warn!("no valid messages to import");
            return Err(ArchiveError::NoMessages);
        }

        let chunk_size = self.config.effective_chunk_size();
        let inserted =
            write_chunks_reporting(&mut self.store, records, chunk_size, &self.progress)?;

        info!(
            store = self.store.name(),
            records = inserted,
            "import complete"
        );

        Ok(ImportSummary {
            records_inserted: inserted,
            chunks_written: records.len().div_ceil(chunk_size),
            preview: records.iter().take(self.config.preview_len).cloned().collect(),
        })
    }

    /// Parses an in-memory transcript and writes it.
    pub fn import_str(&mut self, text: &str) -> Result<ImportSummary> {
        let records = self.parser.parse_str(text);
        self.import_records(&records)
    }

    /// Reads, parses and writes a transcript file.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::Input`] if the file cannot be read; nothing is
    /// written in that case.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportSummary> {
        let records = self.parser.parse_file(path)?;
        self.import_records(&records)
    }
}

/// How an import run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportOutcome {
    /// Every record was written.
    Imported,
    /// The transcript held no messages.
    NoMessages,
    /// A chunk failed after zero or more records were written.
    PartialFailure,
    /// The transcript could not be read.
    InputUnavailable,
    /// Any other failure.
    Failed,
}

/// Caller-facing result of an import run.
///
/// # Example
///
/// ```rust
/// use chatarchive::import::{ImportReport, Importer};
/// use chatarchive::store::MemoryStore;
///
/// let mut importer = Importer::new(MemoryStore::new());
/// let report = ImportReport::from_result(&importer.import_str("\n\n"));
///
/// assert!(!report.success);
/// assert_eq!(
///     report.status_message(),
///     "No valid messages found in the file. Please check the format."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success: bool,
    pub records_inserted: usize,
    pub outcome: ImportOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview: Vec<MessageRecord>,
}

impl ImportReport {
    pub fn from_result(result: &Result<ImportSummary>) -> Self {
        match result {
            Ok(summary) => Self {
                success: true,
                records_inserted: summary.records_inserted,
                outcome: ImportOutcome::Imported,
                error: None,
                preview: summary.preview.clone(),
            },
            Err(err) => Self::from_error(err),
        }
    }

    pub fn from_error(err: &ArchiveError) -> Self {
        let (outcome, records_inserted, message) = match err {
            ArchiveError::NoMessages => (ImportOutcome::NoMessages, 0, err.to_string()),
            ArchiveError::Store { inserted, source } => {
                (ImportOutcome::PartialFailure, *inserted, source.to_string())
            }
            ArchiveError::Input { path, source } => (
                ImportOutcome::InputUnavailable,
                0,
                format!("{}: {source}", path.display()),
            ),
            _ => (ImportOutcome::Failed, 0, err.to_string()),
        };

        Self {
            success: false,
            records_inserted,
            outcome,
            error: Some(message),
            preview: Vec::new(),
        }
    }

    /// Short human-readable status line.
    pub fn status_message(&self) -> String {
        let error = self.error.as_deref().unwrap_or("unknown error");
        match self.outcome {
            ImportOutcome::Imported => {
                format!("Successfully imported {} messages!", self.records_inserted)
            }
            ImportOutcome::NoMessages => {
                "No valid messages found in the file. Please check the format.".to_string()
            }
            ImportOutcome::PartialFailure => format!(
                "Imported {} messages before failure: {}",
                self.records_inserted, error
            ),
            ImportOutcome::InputUnavailable => format!("Could not read input: {error}"),
            ImportOutcome::Failed => format!("Import failed: {error}"),
        }
    }
}
