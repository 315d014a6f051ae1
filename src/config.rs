//! Configuration types for parsing and importing.
//!
//! Plain builder structs with no CLI framework dependencies. The CLI maps
//! its flags onto these.
//!
//! - [`ParserConfig`] - transcript parsing settings
//! - [`ImportConfig`] - chunked persistence settings
//!
//! # Example
//!
//! ```rust
//! use chatarchive::config::{ImportConfig, ParserConfig};
//!
//! let parser = ParserConfig::new().with_sender_colon_limit(64);
//! let import = ImportConfig::new().with_chunk_size(500).with_preview_len(3);
//!
//! assert_eq!(parser.sender_colon_limit, 64);
//! assert_eq!(import.chunk_size, 500);
//! ```

use serde::{Deserialize, Serialize};

/// Default colon-position limit for sender extraction.
pub const DEFAULT_SENDER_COLON_LIMIT: usize = 100;

/// Default number of records per store write.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default number of records returned as an import preview.
pub const DEFAULT_PREVIEW_LEN: usize = 5;

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatarchive::config::ParserConfig;
///
/// let config = ParserConfig::streaming();
/// assert!(config.streaming);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// A colon at or past this many characters into the header remainder
    /// is not treated as a sender separator (default: 100)
    pub sender_colon_limit: usize,

    /// Read the transcript line by line instead of all at once (default: false)
    pub streaming: bool,

    /// Buffer size for streaming (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            sender_colon_limit: DEFAULT_SENDER_COLON_LIMIT,
            streaming: false,
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a streaming-optimized configuration.
    pub fn streaming() -> Self {
        Self {
            streaming: true,
            buffer_size: 256 * 1024, // 256KB for streaming
            ..Self::default()
        }
    }

    /// Sets the colon-position limit for sender extraction.
    #[must_use]
    pub fn with_sender_colon_limit(mut self, limit: usize) -> Self {
        self.sender_colon_limit = limit;
        self
    }

    /// Enables or disables streaming mode.
    #[must_use]
    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.streaming = enabled;
        self
    }

    /// Sets the buffer size for streaming.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}

/// Configuration for writing records to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Records per atomic store write (default: 1000)
    pub chunk_size: usize,

    /// Records returned as a preview after a successful import (default: 5)
    pub preview_len: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

impl ImportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the preview length.
    #[must_use]
    pub fn with_preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }

    /// Chunk size actually used for writes. Never zero.
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}
