//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::JSON_DATETIME_FORMAT;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::record::MessageRecord;

/// One exported record. Optional columns are omitted unless enabled.
#[derive(Serialize)]
pub(super) struct ExportRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    datetime: Option<String>,
    sender: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_system: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_line: Option<&'a str>,
}

impl<'a> ExportRow<'a> {
    pub(super) fn new(record: &'a MessageRecord, config: &OutputConfig) -> Self {
        Self {
            datetime: config
                .include_timestamps
                .then(|| record.timestamp.format(JSON_DATETIME_FORMAT).to_string()),
            sender: &record.sender,
            content: &record.content,
            is_system: config.include_system_flag.then_some(record.is_system),
            raw_line: config.include_raw.then_some(record.raw_line.as_str()),
        }
    }
}

/// Writes records as a pretty-printed JSON array to any writer.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "content": "Hello"},
///   {"sender": "System", "content": "Bob left"}
/// ]
/// ```
pub fn write_json_to<W: Write>(
    records: &[MessageRecord],
    mut writer: W,
    config: &OutputConfig,
) -> Result<()> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(|r| ExportRow::new(r, config)).collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;
    Ok(())
}

/// Writes records to a JSON file.
pub fn write_json(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_json_to(records, BufWriter::new(file), config)
}

/// Renders records as a JSON array string.
pub fn to_json(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(|r| ExportRow::new(r, config)).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
