//! Post-parse processing of records.
//!
//! - [`models`] - export settings ([`OutputConfig`])
//! - [`filter`] - archive search ([`FilterConfig`], [`apply_filters`])
//! - [`output`] - CSV, JSON and JSONL writers

pub mod filter;
pub mod models;
pub mod output;

pub use filter::{FilterConfig, SystemFilter, apply_filters};
pub use models::OutputConfig;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
