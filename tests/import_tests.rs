//! Chunked import behaviour against scripted, in-memory and SQLite stores.

use std::cell::RefCell;
use std::rc::Rc;

use chatarchive::error::StoreError;
use chatarchive::import::{ImportOutcome, ImportReport, Importer, write_in_chunks};
use chatarchive::prelude::*;
use chrono::{Duration, NaiveDate};

// ============================================================================
// Helpers
// ============================================================================

/// Store that records every batch it is handed and can fail on demand.
#[derive(Clone, Default)]
struct RecordingStore {
    calls: Rc<RefCell<Vec<usize>>>,
    accepted: Rc<RefCell<Vec<MessageRecord>>>,
    fail_on_call: Option<usize>,
}

impl RecordingStore {
    fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<usize> {
        self.calls.borrow().clone()
    }
}

impl MessageStore for RecordingStore {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn insert_batch(&mut self, batch: &[MessageRecord]) -> std::result::Result<(), StoreError> {
        self.calls.borrow_mut().push(batch.len());
        if self.fail_on_call == Some(self.calls.borrow().len()) {
            return Err(StoreError::rejected("connection reset"));
        }
        self.accepted.borrow_mut().extend_from_slice(batch);
        Ok(())
    }

    fn fetch_all(&self) -> std::result::Result<Vec<StoredMessage>, StoreError> {
        Ok(Vec::new())
    }
}

/// A transcript of `n` single-line messages, one minute apart.
fn transcript(n: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    (0..n)
        .map(|i| {
            let ts = start + Duration::minutes(i as i64);
            format!("{} - User{}: message {i}", ts.format("%d/%m/%Y, %H:%M"), i % 3)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Chunking
// ============================================================================

#[test]
fn test_2500_records_write_1000_1000_500() {
    let store = RecordingStore::default();
    let mut importer = Importer::new(store.clone());

    let summary = importer.import_str(&transcript(2500)).unwrap();

    assert_eq!(summary.records_inserted, 2500);
    assert_eq!(summary.chunks_written, 3);
    assert_eq!(store.calls(), vec![1000, 1000, 500]);
}

#[test]
fn test_second_chunk_failure_reports_first_chunk_only() {
    let store = RecordingStore::failing_on(2);
    let mut importer = Importer::new(store.clone());

    let result = importer.import_str(&transcript(2500));
    let err = result.as_ref().unwrap_err();

    assert!(err.is_store());
    assert_eq!(err.inserted_count(), Some(1000));
    // No third write is attempted.
    assert_eq!(store.calls(), vec![1000, 1000]);
    assert_eq!(store.accepted.borrow().len(), 1000);

    let report = ImportReport::from_result(&result);
    assert!(!report.success);
    assert_eq!(report.outcome, ImportOutcome::PartialFailure);
    assert_eq!(report.records_inserted, 1000);
    assert_eq!(
        report.status_message(),
        "Imported 1000 messages before failure: batch rejected: connection reset"
    );
}

#[test]
fn test_chunks_preserve_input_order() {
    let store = RecordingStore::default();
    let records = parse_transcript(&transcript(25));

    write_in_chunks(&mut store.clone(), &records, 7).unwrap();

    assert_eq!(store.calls(), vec![7, 7, 7, 4]);
    assert_eq!(*store.accepted.borrow(), records);
}

#[test]
fn test_fewer_records_than_chunk_size() {
    let store = RecordingStore::default();
    let mut importer = Importer::new(store.clone());

    importer.import_str(&transcript(3)).unwrap();
    assert_eq!(store.calls(), vec![3]);
}

#[test]
fn test_custom_chunk_size() {
    let store = RecordingStore::default();
    let mut importer =
        Importer::new(store.clone()).with_config(ImportConfig::new().with_chunk_size(400));

    importer.import_str(&transcript(1000)).unwrap();
    assert_eq!(store.calls(), vec![400, 400, 200]);
}

#[test]
fn test_empty_transcript_makes_no_writes() {
    let store = RecordingStore::default();
    let mut importer = Importer::new(store.clone());

    let result = importer.import_str("\n   \n");
    assert!(result.unwrap_err().is_no_messages());
    assert!(store.calls().is_empty());

    let report = ImportReport::from_result(&importer.import_str(""));
    assert_eq!(
        report.status_message(),
        "No valid messages found in the file. Please check the format."
    );
}

// ============================================================================
// Request-size limits
// ============================================================================

#[test]
fn test_memory_store_limit_is_respected_by_chunking() {
    let mut importer = Importer::new(MemoryStore::with_batch_limit(1000));
    let summary = importer.import_str(&transcript(2500)).unwrap();

    assert_eq!(summary.records_inserted, 2500);
    assert_eq!(importer.store().batches_written(), 3);
}

#[test]
fn test_memory_store_limit_exceeded_fails_first_chunk() {
    let mut importer = Importer::new(MemoryStore::with_batch_limit(500));
    let err = importer.import_str(&transcript(800)).unwrap_err();

    assert_eq!(err.inserted_count(), Some(0));
    assert!(importer.store().is_empty());
}

// ============================================================================
// Files and SQLite
// ============================================================================

#[test]
fn test_unreadable_input_writes_nothing() {
    let store = RecordingStore::default();
    let mut importer = Importer::new(store.clone());

    let result = importer.import_file(std::path::Path::new("/definitely/not/here.txt"));
    let report = ImportReport::from_result(&result);

    assert!(result.unwrap_err().is_input());
    assert!(store.calls().is_empty());
    assert_eq!(report.outcome, ImportOutcome::InputUnavailable);
    assert!(report.status_message().starts_with("Could not read input: "));
}

#[test]
fn test_import_file_into_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("chat.txt");
    std::fs::write(
        &input,
        "12/03/2024, 9:15 pm - Alice: see you\r\ntomorrow\r\n12/03/2024, 9:16 pm - Bob left\r\n",
    )
    .unwrap();

    let store = SqliteStore::open(dir.path().join("archive.db")).unwrap();
    let mut importer = Importer::new(store);
    let summary = importer.import_file(&input).unwrap();
    assert_eq!(summary.records_inserted, 2);

    let rows = importer.store().fetch_all().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].record.content, "see you\ntomorrow");
    assert_eq!(rows[0].record.timestamp.format("%H:%M").to_string(), "21:15");
    assert!(rows[1].record.is_system);
    assert_eq!(rows[1].record.content, "Bob left");
}

#[test]
fn test_repeated_import_duplicates_rows() {
    let mut importer = Importer::new(SqliteStore::open_in_memory().unwrap());
    let text = transcript(10);

    importer.import_str(&text).unwrap();
    importer.import_str(&text).unwrap();

    assert_eq!(importer.store().count().unwrap(), 20);
}
