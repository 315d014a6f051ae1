//! Unified error types for chatarchive.
//!
//! Parsing itself never fails: a line that cannot be read as a message
//! header degrades to a continuation or orphan line. Errors only arise at
//! the edges of the pipeline:
//!
//! - **Input acquisition**: the transcript could not be opened or read
//! - **Empty result**: the transcript produced no records at all
//! - **Store failure**: a chunk write was rejected part-way through an import
//! - **Output**: writing an export file failed

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatarchive operations.
///
/// # Example
///
/// ```rust
/// use chatarchive::error::Result;
/// use chatarchive::MessageRecord;
///
/// fn load() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// The error type for all chatarchive operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// The transcript could not be opened or read.
    ///
    /// Raised before any parsing happens.
    #[error("Could not read input {}: {source}", path.display())]
    Input {
        /// Path of the transcript
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The transcript contained no parseable messages.
    #[error("No valid messages found")]
    NoMessages,

    /// A chunk write failed.
    ///
    /// `inserted` counts the records committed by earlier chunks; nothing
    /// from the failing chunk or any later chunk was written.
    #[error("Store write failed after {inserted} records: {source}")]
    Store {
        /// Records successfully written before the failing chunk
        inserted: usize,
        /// The store's error
        #[source]
        source: StoreError,
    },

    /// An I/O error outside of input acquisition (e.g. writing an export).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid date format in filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An output format or file name could not be used.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A store error outside of a chunked import (opening, reading back).
    #[error("Store error: {0}")]
    Archive(#[from] StoreError),
}

/// Errors raised by a [`MessageStore`](crate::store::MessageStore).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// SQLite rejected the operation.
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The store refused a batch as a whole.
    #[error("batch rejected: {reason}")]
    Rejected {
        /// Why the store refused the batch
        reason: String,
    },

    /// A stored value could not be decoded.
    #[error("corrupt value in column '{column}': {value}")]
    Corrupt {
        /// Column holding the bad value
        column: &'static str,
        /// The raw stored value
        value: String,
    },
}

impl StoreError {
    /// Creates a rejection error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        StoreError::Rejected {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ArchiveError {
    /// Creates an input-acquisition error for `path`.
    pub fn input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ArchiveError::Input {
            path: path.into(),
            source,
        }
    }

    /// Creates a partial-import error.
    pub fn store(inserted: usize, source: StoreError) -> Self {
        ArchiveError::Store { inserted, source }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ArchiveError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ArchiveError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if the input could not be acquired.
    pub fn is_input(&self) -> bool {
        matches!(self, ArchiveError::Input { .. })
    }

    /// Returns `true` if the transcript held no messages.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, ArchiveError::NoMessages)
    }

    /// Returns `true` if a chunk write failed.
    pub fn is_store(&self) -> bool {
        matches!(self, ArchiveError::Store { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ArchiveError::InvalidDate { .. })
    }

    /// Number of records written before a store failure.
    pub fn inserted_count(&self) -> Option<usize> {
        match self {
            ArchiveError::Store { inserted, .. } => Some(*inserted),
            _ => None,
        }
    }
}
