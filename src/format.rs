//! Export format selection.
//!
//! [`OutputFormat`] names an export format without pulling in any CLI
//! dependency, and [`write_to_format`] / [`to_format_string`] dispatch to
//! the matching writer in [`core::output`](crate::core::output).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatarchive::Result<()> {
//! use chatarchive::core::models::OutputConfig;
//! use chatarchive::format::{OutputFormat, to_format_string};
//! use chatarchive::parser::parse_transcript;
//!
//! let records = parse_transcript("1/1/24, 9:00 - Alice: Hello!");
//!
//! let format = OutputFormat::from_path("archive.jsonl")?;
//! let text = to_format_string(&records, format, &OutputConfig::new())?;
//! assert_eq!(text, "{\"sender\":\"Alice\",\"content\":\"Hello!\"}\n");
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;
use crate::error::{ArchiveError, Result};
use crate::record::MessageRecord;

/// Export format for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with `;` delimiter
    #[default]
    Csv,
    /// JSON array
    Json,
    /// JSON Lines, also known as NDJSON
    Jsonl,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// All available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Feature that compiles in this format's writer.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Picks a format from a file extension (case-insensitive).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatarchive::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/messages.NDJSON").unwrap(), OutputFormat::Jsonl);
    /// assert!(OutputFormat::from_path("messages.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        ext.parse().map_err(|_: ArchiveError| {
            ArchiveError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl FromStr for OutputFormat {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ArchiveError::invalid_format(
                "output",
                format!("Unknown format: '{s}'. Expected one of: csv, json, jsonl, ndjson"),
            )),
        }
    }
}

fn feature_disabled(format: OutputFormat) -> ArchiveError {
    ArchiveError::invalid_format(
        "output",
        format!(
            "Output format {format} requires the '{}' feature to be enabled",
            format.required_feature()
        ),
    )
}

/// Writes records in `format` to any writer.
#[allow(unused_variables)]
pub fn write_records<W: Write>(
    records: &[MessageRecord],
    writer: W,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv_to(records, writer, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json_to(records, writer, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl_to(records, writer, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Writes records in `format` to a file.
///
/// # Errors
///
/// Fails if the format's feature is disabled or the file cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[MessageRecord],
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders records in `format` as a string.
#[allow(unused_variables)]
pub fn to_format_string(
    records: &[MessageRecord],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}
