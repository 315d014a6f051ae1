//! Command-line interface definition using clap.
//!
//! - [`Cli`] - top-level arguments and the [`Command`] to run
//! - [`FilterArgs`] / [`ExportArgs`] - option groups shared by subcommands
//! - [`OutputFormat`] - `--format` values, convertible into
//!   [`format::OutputFormat`](crate::format::OutputFormat)
//!
//! ```rust
//! use chatarchive::cli::{Cli, Command};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["chatarchive", "import", "chat.txt", "--db", "archive.db"]);
//! let Command::Import(args) = cli.command else { unreachable!() };
//! assert_eq!(args.chunk_size, 1000);
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_CHUNK_SIZE, DEFAULT_PREVIEW_LEN, DEFAULT_SENDER_COLON_LIMIT, ImportConfig,
    ParserConfig,
};
use crate::core::filter::{FilterConfig, SystemFilter};
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Environment variable naming the default archive database.
pub const DB_ENV: &str = "CHATARCHIVE_DB";

/// Import exported chat transcripts into a searchable archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatarchive")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatarchive parse chat.txt -o messages.csv -t
    chatarchive parse chat.txt -f jsonl --after 2024-01-01
    chatarchive import chat.txt --db archive.db
    chatarchive import chat.txt --dry-run --preview 10
    chatarchive search --db archive.db --query dinner -f json")]
pub struct Cli {
    /// Log chunk-level detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse a transcript and export its messages
    Parse(ParseArgs),

    /// Parse a transcript and store its messages in an archive database
    Import(ImportArgs),

    /// Search an archive database
    Search(SearchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Path to the exported transcript
    pub input: PathBuf,

    /// Read the transcript incrementally instead of loading it whole
    #[arg(long)]
    pub streaming: bool,

    /// Maximum characters before the sender colon
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SENDER_COLON_LIMIT)]
    pub colon_limit: usize,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

impl ParseArgs {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new()
            .with_sender_colon_limit(self.colon_limit)
            .with_streaming(self.streaming)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Path to the exported transcript
    pub input: PathBuf,

    /// Archive database to write to
    #[arg(long, env = DB_ENV, value_name = "PATH", required_unless_present = "dry_run")]
    pub db: Option<PathBuf>,

    /// Records written per store request
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Number of parsed messages to show after importing
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PREVIEW_LEN)]
    pub preview: usize,

    /// Parse and chunk into memory without touching a database
    #[arg(long)]
    pub dry_run: bool,

    /// Print the import report as JSON instead of text
    #[arg(long)]
    pub report_json: bool,

    /// Maximum characters before the sender colon
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SENDER_COLON_LIMIT)]
    pub colon_limit: usize,
}

impl ImportArgs {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_sender_colon_limit(self.colon_limit)
    }

    pub fn import_config(&self) -> ImportConfig {
        ImportConfig::new()
            .with_chunk_size(self.chunk_size)
            .with_preview_len(self.preview)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Archive database to read from
    #[arg(long, env = DB_ENV, value_name = "PATH")]
    pub db: PathBuf,

    /// Text to look for in message content or sender name
    #[arg(short, long)]
    pub query: Option<String>,

    /// Show at most this many matches
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// List oldest messages first (default: newest first)
    #[arg(long)]
    pub oldest_first: bool,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Filter options shared by `parse` and `search`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Only messages from this sender (case-insensitive)
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Drop system notices
    #[arg(long, conflicts_with = "only_system")]
    pub no_system: bool,

    /// Keep only system notices
    #[arg(long)]
    pub only_system: bool,
}

impl FilterArgs {
    /// Builds a [`FilterConfig`], validating the dates.
    pub fn to_filter(&self, query: Option<&str>) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();

        if let Some(query) = query {
            filter = filter.with_query(query);
        }
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        if self.no_system {
            filter = filter.with_system(SystemFilter::Exclude);
        } else if self.only_system {
            filter = filter.with_system(SystemFilter::Only);
        }

        Ok(filter)
    }
}

/// Export options shared by `parse` and `search`.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Include timestamps
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include the system-notice flag
    #[arg(long)]
    pub system_flag: bool,

    /// Include the unmodified source text
    #[arg(long)]
    pub raw: bool,
}

impl ExportArgs {
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_timestamps: self.timestamps,
            include_system_flag: self.system_flag,
            include_raw: self.raw,
        }
    }
}

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// JSON Lines, one object per message
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("chatarchive").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let Command::Parse(args) = parse(&["parse", "chat.txt"]).command else {
            panic!("expected parse");
        };
        assert_eq!(args.input, PathBuf::from("chat.txt"));
        assert_eq!(args.export.format, OutputFormat::Csv);
        assert!(args.export.output.is_none());
        assert_eq!(args.parser_config().sender_colon_limit, 100);
    }

    #[test]
    fn test_import_options() {
        let cli = parse(&[
            "import", "chat.txt", "--db", "a.db", "--chunk-size", "250", "--preview", "0", "-v",
        ]);
        assert!(cli.verbose);
        let Command::Import(args) = cli.command else {
            panic!("expected import");
        };
        assert_eq!(args.db, Some(PathBuf::from("a.db")));
        assert_eq!(args.import_config().chunk_size, 250);
        assert_eq!(args.import_config().preview_len, 0);
    }

    #[test]
    fn test_import_dry_run_needs_no_db() {
        let Command::Import(args) = parse(&["import", "chat.txt", "--dry-run"]).command else {
            panic!("expected import");
        };
        assert!(args.dry_run);
    }

    #[test]
    fn test_search_order() {
        let Command::Search(args) = parse(&["search", "--db", "a.db"]).command else {
            panic!("expected search");
        };
        assert!(!args.oldest_first);

        let Command::Search(args) =
            parse(&["search", "--db", "a.db", "--oldest-first", "--limit", "3"]).command
        else {
            panic!("expected search");
        };
        assert!(args.oldest_first);
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn test_system_flags_conflict() {
        let result = Cli::try_parse_from([
            "chatarchive", "search", "--db", "a.db", "--no-system", "--only-system",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_args_to_filter() {
        let filters = FilterArgs {
            after: Some("2024-01-01".into()),
            from: Some("Alice".into()),
            only_system: true,
            ..FilterArgs::default()
        };
        let config = filters.to_filter(Some("dinner")).unwrap();
        assert_eq!(config.query.as_deref(), Some("dinner"));
        assert_eq!(config.from.as_deref(), Some("Alice"));
        assert_eq!(config.system, SystemFilter::Only);
        assert!(config.after.is_some());

        let bad = FilterArgs {
            before: Some("tomorrow".into()),
            ..FilterArgs::default()
        };
        assert!(bad.to_filter(None).unwrap_err().is_invalid_date());
    }

    #[test]
    fn test_format_alias_and_conversion() {
        let Command::Parse(args) = parse(&["parse", "chat.txt", "-f", "ndjson"]).command else {
            panic!("expected parse");
        };
        assert_eq!(args.export.format, OutputFormat::Jsonl);
        assert_eq!(
            crate::format::OutputFormat::from(args.export.format),
            crate::format::OutputFormat::Jsonl
        );
        assert_eq!(args.export.format.to_string(), "JSONL");
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
