//! Archive search.
//!
//! [`FilterConfig`] holds the search criteria and [`apply_filters`] applies
//! them to a collection of records.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Query | [`with_query`](FilterConfig::with_query) | Substring of content or sender |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific user |
//! | System | [`with_system`](FilterConfig::with_system) | Keep, drop or isolate system notices |
//!
//! # Examples
//!
//! ```
//! use chatarchive::core::filter::{FilterConfig, apply_filters};
//! use chatarchive::parser::parse_transcript;
//!
//! let records = parse_transcript(
//!     "1/1/24, 9:00 - Alice: Dinner tonight?\n\
//!      1/1/24, 9:05 - Bob: sure\n\
//!      2/1/24, 20:00 - Bob: DINNER was great",
//! );
//!
//! // Case-insensitive match on content or sender
//! let config = FilterConfig::new().with_query("dinner");
//! assert_eq!(apply_filters(records.clone(), &config).len(), 2);
//!
//! let config = FilterConfig::new().with_query("bob").with_date_from("2024-01-02")?;
//! let found = apply_filters(records, &config);
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].content, "DINNER was great");
//! # Ok::<(), chatarchive::ArchiveError>(())
//! ```
//!
//! # Behavior Notes
//!
//! - Query and sender matching ignore case (full Unicode lowercase)
//! - Date bounds are inclusive whole days
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ArchiveError;
use crate::record::MessageRecord;

/// How system notices are treated by a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemFilter {
    /// Keep system notices alongside user messages.
    #[default]
    Include,
    /// Drop system notices.
    Exclude,
    /// Keep only system notices.
    Only,
}

impl SystemFilter {
    fn accepts(self, is_system: bool) -> bool {
        match self {
            SystemFilter::Include => true,
            SystemFilter::Exclude => !is_system,
            SystemFilter::Only => is_system,
        }
    }
}

/// Search criteria over archived records.
///
/// A record must match every active criterion to be kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Substring looked up in content or sender, case-insensitive.
    pub query: Option<String>,

    /// Include only messages on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,

    /// Treatment of system notices.
    pub system: SystemFilter,
}

impl FilterConfig {
    /// Creates an empty filter; every record passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query. An empty or blank query is ignored.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        self
    }

    /// Sets the start date filter (inclusive). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(self, date_str: &str) -> Result<Self, ArchiveError> {
        Ok(self.with_after(parse_date(date_str)?.and_time(NaiveTime::MIN)))
    }

    /// Sets the end date filter (inclusive). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(self, date_str: &str) -> Result<Self, ArchiveError> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Ok(self.with_before(parse_date(date_str)?.and_time(end_of_day)))
    }

    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    #[must_use]
    pub fn with_system(mut self, system: SystemFilter) -> Self {
        self.system = system;
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.query.is_some()
            || self.after.is_some()
            || self.before.is_some()
            || self.from.is_some()
            || self.system != SystemFilter::Include
    }

    /// Returns `true` if `record` satisfies every active criterion.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        if !self.system.accepts(record.is_system) {
            return false;
        }

        if let Some(ref from) = self.from {
            if record.sender.to_lowercase() != from.to_lowercase() {
                return false;
            }
        }

        if self.after.is_some_and(|after| record.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| record.timestamp > before) {
            return false;
        }

        match self.query {
            Some(ref needle) => {
                record.content.to_lowercase().contains(needle.as_str())
                    || record.sender.to_lowercase().contains(needle.as_str())
            }
            None => true,
        }
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ArchiveError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ArchiveError::invalid_date(date_str))
}

/// Keeps the records that match `config`, preserving their order.
///
/// Returns the input unchanged if no filter is active.
pub fn apply_filters(records: Vec<MessageRecord>, config: &FilterConfig) -> Vec<MessageRecord> {
    if !config.is_active() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| config.matches(record))
        .collect()
}
