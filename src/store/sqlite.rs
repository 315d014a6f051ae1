//! SQLite-backed archive store.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{Connection, Row, params};
use tracing::debug;

use super::MessageStore;
use crate::error::StoreError;
use crate::record::{MessageRecord, StoredMessage};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS chat_messages (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    datetime   TEXT NOT NULL,
    sender     TEXT NOT NULL,
    content    TEXT NOT NULL,
    is_system  INTEGER DEFAULT 0,
    raw_line   TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_chat_messages_datetime ON chat_messages (datetime);
"#;

const INSERT_SQL: &str = "INSERT INTO chat_messages (datetime, sender, content, is_system, raw_line) \
     VALUES (?1, ?2, ?3, ?4, ?5)";

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Archive stored in a `chat_messages` table.
///
/// Each batch is written inside one transaction, so a failed batch leaves
/// no rows behind.
///
/// # Example
///
/// ```rust
/// use chatarchive::store::{MessageStore, SqliteStore};
/// use chatarchive::parser::parse_transcript;
///
/// let mut store = SqliteStore::open_in_memory()?;
/// store.insert_batch(&parse_transcript("1/1/24, 9:00 - A: hi"))?;
///
/// let rows = store.fetch_all()?;
/// assert_eq!(rows[0].record.sender, "A");
/// # Ok::<(), chatarchive::error::StoreError>(())
/// ```
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a database file and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened sqlite archive");
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Direct access to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl MessageStore for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn insert_batch(&mut self, batch: &[MessageRecord]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_SQL)?;
            for record in batch {
                stmt.execute(params![
                    record.timestamp.format(DATETIME_FORMAT).to_string(),
                    record.sender,
                    record.content,
                    record.is_system,
                    record.raw_line,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, datetime, sender, content,
                   COALESCE(is_system, 0), COALESCE(raw_line, ''), created_at
            FROM chat_messages
            ORDER BY datetime ASC, id ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], RawRow::from_row)?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;

        rows.into_iter().map(RawRow::into_stored).collect()
    }

    fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM chat_messages", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Row with timestamps still in their stored text form.
struct RawRow {
    id: i64,
    datetime: String,
    sender: String,
    content: String,
    is_system: bool,
    raw_line: String,
    created_at: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            datetime: row.get(1)?,
            sender: row.get(2)?,
            content: row.get(3)?,
            is_system: row.get(4)?,
            raw_line: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn into_stored(self) -> Result<StoredMessage, StoreError> {
        Ok(StoredMessage {
            id: self.id,
            created_at: parse_datetime("created_at", &self.created_at)?,
            record: MessageRecord {
                timestamp: parse_datetime("datetime", &self.datetime)?,
                sender: self.sender,
                content: self.content,
                is_system: self.is_system,
                raw_line: self.raw_line,
            },
        })
    }
}

fn parse_datetime(column: &'static str, value: &str) -> Result<NaiveDateTime, StoreError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|_| StoreError::Corrupt {
            column,
            value: value.to_string(),
        })
}
