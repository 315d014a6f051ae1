//! In-memory archive store.

use chrono::Local;

use super::MessageStore;
use crate::error::StoreError;
use crate::record::{MessageRecord, StoredMessage};

/// Keeps records in a `Vec`.
///
/// Used for dry runs and tests. A batch limit makes it reject oversized
/// requests the way a hosted backend would.
///
/// # Example
///
/// ```rust
/// use chatarchive::store::{MemoryStore, MessageStore};
/// use chatarchive::parser::parse_transcript;
///
/// let records = parse_transcript("1/1/24, 9:00 - A: hi");
///
/// let mut store = MemoryStore::new();
/// store.insert_batch(&records).unwrap();
/// assert_eq!(store.len(), 1);
///
/// let mut strict = MemoryStore::with_batch_limit(0);
/// assert!(strict.insert_batch(&records).is_err());
/// assert!(strict.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<StoredMessage>,
    next_id: i64,
    batch_limit: Option<usize>,
    batches: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects batches larger than `limit`.
    pub fn with_batch_limit(limit: usize) -> Self {
        Self {
            batch_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of batches accepted so far.
    pub fn batches_written(&self) -> usize {
        self.batches
    }

    /// Stored rows in insertion order.
    pub fn rows(&self) -> &[StoredMessage] {
        &self.rows
    }
}

impl MessageStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn insert_batch(&mut self, batch: &[MessageRecord]) -> Result<(), StoreError> {
        if let Some(limit) = self.batch_limit {
            if batch.len() > limit {
                return Err(StoreError::rejected(format!(
                    "{} records exceeds the limit of {limit} per request",
                    batch.len()
                )));
            }
        }

        let created_at = Local::now().naive_local();
        self.rows.reserve(batch.len());
        for record in batch {
            self.next_id += 1;
            self.rows.push(StoredMessage {
                id: self.next_id,
                created_at,
                record: record.clone(),
            });
        }
        self.batches += 1;
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|row| (row.record.timestamp, row.id));
        Ok(rows)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.rows.len())
    }
}
