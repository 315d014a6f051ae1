//! Message records produced by the transcript parser.
//!
//! A [`MessageRecord`] is one reconstructed message: a header line plus any
//! continuation lines that followed it, or a standalone orphan line seen
//! before the first header.
//!
//! # Examples
//!
//! ```
//! use chatarchive::record::{MessageRecord, SYSTEM_SENDER};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 2, 1)
//!     .unwrap()
//!     .and_hms_opt(17, 0, 0)
//!     .unwrap();
//!
//! let msg = MessageRecord::user(ts, "Alice", "hi", "1/2/24, 5:00 pm - Alice: hi");
//! assert!(!msg.is_system());
//!
//! let notice = MessageRecord::system(ts, "Alice created group", "1/2/24, 5:00 pm - Alice created group");
//! assert_eq!(notice.sender(), SYSTEM_SENDER);
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sender value used when no attributable sender could be extracted.
pub const SYSTEM_SENDER: &str = "System";

/// One message reconstructed from a transcript.
///
/// Serializes with the column names of the archive store:
/// `datetime`, `sender`, `content`, `is_system`, `raw_line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was sent, exactly as written in the transcript.
    ///
    /// Naive: the export format never carries a timezone.
    #[serde(rename = "datetime")]
    pub timestamp: NaiveDateTime,

    /// Display name of the author, or [`SYSTEM_SENDER`].
    pub sender: String,

    /// Message body. Continuation lines are joined with `\n`.
    pub content: String,

    /// `true` when no sender could be extracted.
    pub is_system: bool,

    /// All source lines of this message, unmodified, joined with `\n`.
    pub raw_line: String,
}

impl MessageRecord {
    /// Creates a record attributed to `sender`.
    pub fn user(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
        raw_line: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            content: content.into(),
            is_system: false,
            raw_line: raw_line.into(),
        }
    }

    /// Creates an unattributed system record.
    pub fn system(
        timestamp: NaiveDateTime,
        content: impl Into<String>,
        raw_line: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: SYSTEM_SENDER.to_string(),
            content: content.into(),
            is_system: true,
            raw_line: raw_line.into(),
        }
    }

    /// Appends a continuation line to both the body and the raw text.
    pub fn append_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
        self.raw_line.push('\n');
        self.raw_line.push_str(line);
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_system(&self) -> bool {
        self.is_system
    }

    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Number of source lines this record was built from.
    pub fn line_count(&self) -> usize {
        self.raw_line.split('\n').count()
    }
}

/// A record as read back from an archive store.
///
/// `id` and `created_at` are assigned by the store, never by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Store-generated identifier.
    pub id: i64,

    /// When the store accepted the row.
    pub created_at: NaiveDateTime,

    #[serde(flatten)]
    pub record: MessageRecord,
}

impl StoredMessage {
    /// Drops store metadata, returning the parsed record.
    pub fn into_record(self) -> MessageRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_user_record() {
        let msg = MessageRecord::user(ts(), "Alice", "hello", "1/1/24, 9:00 - Alice: hello");
        assert_eq!(msg.sender(), "Alice");
        assert_eq!(msg.content(), "hello");
        assert!(!msg.is_system());
        assert_eq!(msg.line_count(), 1);
    }

    #[test]
    fn test_system_record_uses_marker() {
        let msg = MessageRecord::system(ts(), "random preamble", "random preamble");
        assert_eq!(msg.sender(), SYSTEM_SENDER);
        assert!(msg.is_system());
    }

    #[test]
    fn test_append_line() {
        let mut msg = MessageRecord::user(ts(), "A", "first line", "1/1/24, 9:00 - A: first line");
        msg.append_line("second line");

        assert_eq!(msg.content(), "first line\nsecond line");
        assert_eq!(msg.raw_line(), "1/1/24, 9:00 - A: first line\nsecond line");
        assert_eq!(msg.line_count(), 2);
    }

    #[test]
    fn test_serialization_uses_store_columns() {
        let msg = MessageRecord::user(ts(), "Alice", "hi", "raw");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["datetime"], "2024-01-01T09:00:00");
        assert_eq!(json["sender"], "Alice");
        assert_eq!(json["is_system"], false);
        assert_eq!(json["raw_line"], "raw");
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_stored_message_flattens_record() {
        let stored = StoredMessage {
            id: 7,
            created_at: ts(),
            record: MessageRecord::system(ts(), "notice", "notice"),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["is_system"], true);

        let back: StoredMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back.into_record().content, "notice");
    }
}
