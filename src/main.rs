//! # chatarchive CLI
//!
//! Command-line front end for the chatarchive library.

use std::io;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chatarchive::cli::{Cli, Command, ExportArgs, ImportArgs, ParseArgs, SearchArgs};
use chatarchive::core::apply_filters;
use chatarchive::format::{OutputFormat, write_records, write_to_format};
use chatarchive::import::{ImportReport, Importer};
use chatarchive::parser::TranscriptParser;
use chatarchive::progress::stderr_progress;
use chatarchive::store::{MemoryStore, MessageStore, SqliteStore};
use chatarchive::{ArchiveError, MessageRecord, StoredMessage};

fn main() {
    let cli = <Cli as ClapParser>::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr; stdout carries status lines or exported data.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("chatarchive=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatarchive=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Returns `Ok(false)` when the command already reported its own failure.
fn run(cli: Cli) -> Result<bool, ArchiveError> {
    match cli.command {
        Command::Parse(args) => run_parse(&args).map(|()| true),
        Command::Import(args) => Ok(run_import(&args)),
        Command::Search(args) => run_search(&args).map(|()| true),
    }
}

fn run_parse(args: &ParseArgs) -> Result<(), ArchiveError> {
    let filter = args.filters.to_filter(None)?;
    let parser = TranscriptParser::with_config(args.parser_config());

    let start = Instant::now();
    let records = parser.parse_file(&args.input)?;
    let parsed = records.len();
    let parse_time = start.elapsed();

    let records = apply_filters(records, &filter);
    emit(&records, &args.export)?;

    // Without -o the export itself is on stdout, so stay quiet.
    let Some(ref output) = args.export.output else {
        return Ok(());
    };

    println!("📦 chatarchive v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output.display());
    println!("📄 Format:  {}", args.export.format);
    if args.streaming {
        println!("🌊 Mode:    Streaming");
    }
    println!();
    println!(
        "   Found {} messages ({:.2}s)",
        parsed,
        parse_time.as_secs_f64()
    );
    if filter.is_active() {
        println!("   {} messages after filtering", records.len());
    }
    println!("✅ Done! Output saved to {}", output.display());

    Ok(())
}

fn run_import(args: &ImportArgs) -> bool {
    let report = match open_import_store(args) {
        Ok(store) => {
            let mut importer = Importer::new(store)
                .with_parser(TranscriptParser::with_config(args.parser_config()))
                .with_config(args.import_config());
            if !args.report_json {
                importer = importer.with_progress(stderr_progress());
            }
            ImportReport::from_result(&importer.import_file(&args.input))
        }
        Err(e) => ImportReport::from_error(&e),
    };

    if args.report_json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("❌ Error: {}", e);
                return false;
            }
        }
    } else {
        print_report(&report, args.dry_run);
    }

    report.success
}

fn open_import_store(args: &ImportArgs) -> Result<Box<dyn MessageStore>, ArchiveError> {
    match args.db {
        Some(ref path) if !args.dry_run => Ok(Box::new(SqliteStore::open(path)?)),
        _ => Ok(Box::new(MemoryStore::new())),
    }
}

fn print_report(report: &ImportReport, dry_run: bool) {
    if dry_run {
        println!("🧪 Dry run: nothing was written to a database");
    }

    let icon = if report.success { "✅" } else { "❌" };
    println!("{icon} {}", report.status_message());

    if !report.preview.is_empty() {
        println!();
        println!("👀 Preview:");
        for record in &report.preview {
            println!(
                "   [{}] {}: {}",
                record.timestamp.format("%Y-%m-%d %H:%M"),
                record.sender,
                record.content.lines().next().unwrap_or_default()
            );
        }
    }
}

fn run_search(args: &SearchArgs) -> Result<(), ArchiveError> {
    let filter = args.filters.to_filter(args.query.as_deref())?;
    let store = open_existing_archive(&args.db)?;

    let records: Vec<MessageRecord> = store
        .fetch_all()?
        .into_iter()
        .map(StoredMessage::into_record)
        .collect();
    let total = records.len();

    let mut found = apply_filters(records, &filter);
    // Stores read oldest first; the archive view shows newest first.
    if !args.oldest_first {
        found.reverse();
    }
    if let Some(limit) = args.limit {
        found.truncate(limit);
    }
    info!(total, matches = found.len(), "search complete");

    emit(&found, &args.export)?;

    if let Some(ref output) = args.export.output {
        println!(
            "🔍 {} of {} messages matched, saved to {}",
            found.len(),
            total,
            output.display()
        );
    }

    Ok(())
}

fn open_existing_archive(path: &Path) -> Result<SqliteStore, ArchiveError> {
    if !path.exists() {
        return Err(ArchiveError::input(
            path,
            io::Error::new(io::ErrorKind::NotFound, "archive database not found"),
        ));
    }
    Ok(SqliteStore::open(path)?)
}

fn emit(records: &[MessageRecord], export: &ExportArgs) -> Result<(), ArchiveError> {
    let format: OutputFormat = export.format.into();
    let config = export.output_config();

    match export.output {
        Some(ref path) => write_to_format(records, path, format, &config),
        None => write_records(records, io::stdout().lock(), format, &config),
    }
}
