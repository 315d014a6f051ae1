//! Export writers for parsed or archived records.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter (`csv-output` feature)
//! - [`write_json`] / [`to_json`] - JSON array (`json-output` feature)
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line (`json-output` feature)
//!
//! Each writer also has a `*_to` form taking any [`std::io::Write`].
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatarchive::Result<()> {
//! use chatarchive::core::models::OutputConfig;
//! use chatarchive::core::output::{to_csv, to_jsonl};
//! use chatarchive::parser::parse_transcript;
//!
//! let records = parse_transcript("1/1/24, 9:00 - Alice: Hello!\n1/1/24, 9:01 - Bob: Hi!");
//! let config = OutputConfig::new().with_timestamps();
//!
//! let csv = to_csv(&records, &config)?;
//! assert!(csv.starts_with("Timestamp;Sender;Content"));
//!
//! let jsonl = to_jsonl(&records, &config)?;
//! assert_eq!(jsonl.lines().count(), 2);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv, write_csv_to};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json, write_json_to};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl, write_jsonl_to};

/// Timestamp layout used in CSV exports.
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout used in JSON exports.
pub const JSON_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
