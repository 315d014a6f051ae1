//! CSV output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::CSV_DATETIME_FORMAT;
use crate::core::models::OutputConfig;
use crate::error::{ArchiveError, Result};
use crate::record::MessageRecord;

/// Writes records as CSV to any writer.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp` (optional), `Sender`, `Content`, `IsSystem`
///   (optional), `RawLine` (optional)
/// - Multi-line content is quoted, never split across rows
pub fn write_csv_to<W: Write>(
    records: &[MessageRecord],
    writer: W,
    config: &OutputConfig,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    writer.write_record(build_header(config))?;
    for record in records {
        writer.write_record(build_row(record, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes records to a CSV file.
pub fn write_csv(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_csv_to(records, BufWriter::new(file), config)
}

/// Renders records as a CSV string.
pub fn to_csv(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_to(records, &mut buf, config)?;
    String::from_utf8(buf).map_err(|e| ArchiveError::invalid_format("csv", e.to_string()))
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::with_capacity(5);

    if config.include_timestamps {
        header.push("Timestamp");
    }
    header.push("Sender");
    header.push("Content");
    if config.include_system_flag {
        header.push("IsSystem");
    }
    if config.include_raw {
        header.push("RawLine");
    }

    header
}

fn build_row(record: &MessageRecord, config: &OutputConfig) -> Vec<String> {
    let mut row = Vec::with_capacity(5);

    if config.include_timestamps {
        row.push(record.timestamp.format(CSV_DATETIME_FORMAT).to_string());
    }
    row.push(record.sender.clone());
    row.push(record.content.clone());
    if config.include_system_flag {
        row.push(record.is_system.to_string());
    }
    if config.include_raw {
        row.push(record.raw_line.clone());
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_transcript;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_csv_basic() {
        let records = parse_transcript("1/1/24, 9:00 - Alice: Hello\n1/1/24, 9:01 - Bob: Hi there");

        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&records, temp_file.path(), &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.starts_with("Sender;Content"));
        assert!(content.contains("Alice;Hello"));
        assert!(content.contains("Bob;Hi there"));
    }

    #[test]
    fn test_csv_all_columns() {
        let records = parse_transcript("15/06/2024, 12:30 - Alice joined");
        let csv = to_csv(&records, &OutputConfig::all()).unwrap();

        assert!(csv.contains("Timestamp;Sender;Content;IsSystem;RawLine"));
        assert!(csv.contains("2024-06-15 12:30:00;System;Alice joined;true;15/06/2024, 12:30 - Alice joined"));
    }

    #[test]
    fn test_csv_multiline_round_trips() {
        let records = parse_transcript("1/1/24, 9:00 - Alice: line one\nline; two");
        let csv = to_csv(&records, &OutputConfig::new()).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "line one\nline; two");
    }
}
