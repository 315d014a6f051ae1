//! # chatarchive
//!
//! Turns an exported instant-messaging transcript into an ordered sequence
//! of message records and persists them to an archive in chunks.
//!
//! A transcript line such as
//!
//! ```text
//! 12/03/2024, 9:15 pm - Alice: see you tomorrow
//! ```
//!
//! opens a new message. Lines that do not look like that continue the
//! message above them, and blank lines are dropped. A header whose text has
//! no plausible `sender:` prefix becomes a system notice.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatarchive::prelude::*;
//!
//! let records = parse_transcript(
//!     "12/03/2024, 9:15 pm - Alice: see you tomorrow\n\
//!      bring the tickets\n\
//!      12/03/2024, 9:16 pm - Bob left",
//! );
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].content, "see you tomorrow\nbring the tickets");
//! assert!(records[1].is_system);
//! ```
//!
//! ## Importing
//!
//! ```rust
//! use chatarchive::prelude::*;
//!
//! let mut importer = Importer::new(MemoryStore::new())
//!     .with_config(ImportConfig::new().with_chunk_size(1000));
//!
//! let report = ImportReport::from_result(&importer.import_str("1/1/24, 9:00 - A: hi"));
//! assert_eq!(report.status_message(), "Successfully imported 1 messages!");
//! ```
//!
//! ## Module Structure
//!
//! - [`record`] - [`MessageRecord`], [`StoredMessage`]
//! - [`parsing`] - header matching and sender splitting for single lines
//! - [`parser`] - line assembly, [`TranscriptParser`](parser::TranscriptParser),
//!   incremental [`RecordIterator`](parser::RecordIterator)
//! - [`store`] - [`MessageStore`](store::MessageStore) backends
//! - [`import`] - chunked persistence and import reporting
//! - [`progress`] - per-chunk progress callbacks
//! - [`config`] - parser and import settings
//! - [`core`] - search filters and export writers
//! - [`format`] - export format selection
//! - [`cli`] - clap definitions for the binary (feature `cli`)
//! - [`error`] - [`ArchiveError`], [`Result`]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod import;
pub mod parser;
pub mod parsing;
pub mod progress;
pub mod record;
pub mod store;

pub use error::{ArchiveError, Result};
pub use record::{MessageRecord, SYSTEM_SENDER, StoredMessage};

/// Common imports.
///
/// ```rust
/// use chatarchive::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ArchiveError, Result, StoreError};
    pub use crate::record::{MessageRecord, SYSTEM_SENDER, StoredMessage};

    pub use crate::config::{ImportConfig, ParserConfig};
    pub use crate::parser::{ParseStats, TranscriptParser, parse_transcript};

    pub use crate::import::{ImportReport, ImportSummary, Importer, write_in_chunks};
    pub use crate::store::{MemoryStore, MessageStore};
    #[cfg(feature = "sqlite")]
    pub use crate::store::SqliteStore;

    pub use crate::core::filter::{FilterConfig, SystemFilter, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::format::OutputFormat;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
