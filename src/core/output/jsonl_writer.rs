//! JSON Lines (JSONL) output writer.
//!
//! One object per line, which suits appending to existing datasets and
//! line-oriented tooling.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::json_writer::ExportRow;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::record::MessageRecord;

/// Writes records as JSON Lines to any writer.
///
/// # Format
/// ```text
/// {"sender":"Alice","content":"Hello"}
/// {"sender":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl_to<W: Write>(
    records: &[MessageRecord],
    mut writer: W,
    config: &OutputConfig,
) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, &ExportRow::new(record, config))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes records to a JSONL file.
pub fn write_jsonl(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_jsonl_to(records, BufWriter::new(file), config)
}

/// Renders records as a JSONL string, one trailing newline per record.
pub fn to_jsonl(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(&ExportRow::new(record, config))?);
        out.push('\n');
    }
    Ok(out)
}
