//! Persistent archive stores.
//!
//! A [`MessageStore`] accepts records in batches. Each call to
//! [`insert_batch`](MessageStore::insert_batch) is atomic: the store either
//! keeps the whole batch or none of it. The chunking policy that sits on
//! top lives in [`import`](crate::import).
//!
//! - [`MemoryStore`] - in-process store, optionally enforcing a per-request
//!   size limit
//! - [`SqliteStore`] - `chat_messages` table in a SQLite database (feature
//!   `sqlite`)

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::record::{MessageRecord, StoredMessage};

/// A destination for parsed records.
pub trait MessageStore {
    /// Human-readable name of the backend.
    fn name(&self) -> &'static str;

    /// Writes a whole batch atomically.
    ///
    /// On error nothing from `batch` may remain in the store.
    fn insert_batch(&mut self, batch: &[MessageRecord]) -> Result<(), StoreError>;

    /// Reads every stored message, oldest `datetime` first.
    fn fetch_all(&self) -> Result<Vec<StoredMessage>, StoreError>;

    /// Number of stored messages.
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.fetch_all()?.len())
    }
}

impl<S: MessageStore + ?Sized> MessageStore for &mut S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn insert_batch(&mut self, batch: &[MessageRecord]) -> Result<(), StoreError> {
        (**self).insert_batch(batch)
    }

    fn fetch_all(&self) -> Result<Vec<StoredMessage>, StoreError> {
        (**self).fetch_all()
    }

    fn count(&self) -> Result<usize, StoreError> {
        (**self).count()
    }
}

impl<S: MessageStore + ?Sized> MessageStore for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn insert_batch(&mut self, batch: &[MessageRecord]) -> Result<(), StoreError> {
        (**self).insert_batch(batch)
    }

    fn fetch_all(&self) -> Result<Vec<StoredMessage>, StoreError> {
        (**self).fetch_all()
    }

    fn count(&self) -> Result<usize, StoreError> {
        (**self).count()
    }
}
