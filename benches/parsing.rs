//! Benchmarks for chatarchive parsing, filtering, export and import.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- transcript`

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatarchive::core::output::{to_csv, to_json, to_jsonl};
use chatarchive::core::{FilterConfig, OutputConfig, apply_filters};
use chatarchive::import::write_in_chunks;
use chatarchive::parser::TranscriptParser;
use chatarchive::store::MemoryStore;

use chrono::{Duration, NaiveDate};

const SIZES: [usize; 4] = [100, 1_000, 10_000, 50_000];

// =============================================================================
// Test Data Generators
// =============================================================================

/// `count` messages, every fifth one spanning two lines and every tenth a
/// system notice.
fn generate_transcript(count: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap();

    let mut lines = Vec::with_capacity(count + count / 5);
    for i in 0..count {
        let ts = (start + Duration::minutes(i as i64)).format("%d/%m/%Y, %-I:%M %P");
        if i % 10 == 0 {
            lines.push(format!("{ts} - Bob changed the subject to \"{i}\""));
            continue;
        }
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        lines.push(format!("{ts} - {sender}: Message number {i}"));
        if i % 5 == 0 {
            lines.push(format!("continued line for {i}"));
        }
    }
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parse_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcript_parse_str");
    let parser = TranscriptParser::new();

    for size in SIZES {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let records = parser.parse_str(black_box(text));
                black_box(records)
            });
        });
    }
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcript_stream");
    let parser = TranscriptParser::new();

    for size in SIZES {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let count = parser
                    .stream(Cursor::new(black_box(text.as_bytes())))
                    .filter_map(Result::ok)
                    .count();
                black_box(count)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Filter Benchmarks
// =============================================================================

fn bench_filter_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_query");
    let parser = TranscriptParser::new();
    let filter = FilterConfig::new().with_query("NUMBER 9");

    for size in [1_000_usize, 10_000, 50_000] {
        let records = parser.parse_str(&generate_transcript(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &records,
            |b, records| {
                b.iter(|| black_box(apply_filters(records.clone(), &filter)));
            },
        );
    }
    group.finish();
}

fn bench_filter_by_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_date");
    let parser = TranscriptParser::new();
    let filter = FilterConfig::new()
        .with_date_from("2024-01-16")
        .and_then(|f| f.with_date_to("2024-01-20"))
        .unwrap();

    for size in [1_000_usize, 10_000, 50_000] {
        let records = parser.parse_str(&generate_transcript(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &records,
            |b, records| {
                b.iter(|| black_box(apply_filters(records.clone(), &filter)));
            },
        );
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let parser = TranscriptParser::new();
    let config = OutputConfig::all();

    for size in [1_000_usize, 10_000] {
        let records = parser.parse_str(&generate_transcript(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("csv", size), &records, |b, records| {
            b.iter(|| black_box(to_csv(records, &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("json", size), &records, |b, records| {
            b.iter(|| black_box(to_json(records, &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("jsonl", size), &records, |b, records| {
            b.iter(|| black_box(to_jsonl(records, &config).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// Import Benchmarks
// =============================================================================

fn bench_chunked_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunked_write");
    let records = TranscriptParser::new().parse_str(&generate_transcript(10_000));
    group.throughput(Throughput::Elements(records.len() as u64));

    for chunk_size in [100_usize, 1_000, 5_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut store = MemoryStore::new();
                    write_in_chunks(&mut store, black_box(&records), chunk_size).unwrap();
                    black_box(store.len())
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_parse_str,
    bench_stream,
    bench_filter_query,
    bench_filter_by_date,
    bench_output,
    bench_chunked_write,
);

criterion_main!(benches);
