//! Criterion benchmarks for styled_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use styled_logger::prelude::*;
use styled_logger::{id_color, make_colors_prefix, Formatter};
use tempfile::TempDir;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime")
}

// ============================================================================
// Styling Benchmarks
// ============================================================================

fn bench_styling(c: &mut Criterion) {
    let mut group = c.benchmark_group("styling");
    group.throughput(Throughput::Elements(1));

    let codes = [StyleCode::BOLD, StyleCode::RED, StyleCode::UNDERLINE];

    group.bench_function("colors_prefix", |b| {
        b.iter(|| black_box(make_colors_prefix(black_box(&codes))));
    });

    group.bench_function("styled_text_concat", |b| {
        b.iter(|| {
            let message = StyledText::new("request", [StyleCode::BOLD])
                + " served in "
                + StyledText::new("12ms", [StyleCode::GREEN]);
            black_box(message)
        });
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let message = StyledText::new("user", [StyleCode::BOLD])
        + " logged in from "
        + StyledText::new("10.0.0.7", [id_color(208).unwrap()]);
    let record = Record::new(LogLevel::Info, message);

    for colored in [false, true] {
        let formatter =
            Formatter::new(colored, TimeConfig::default(), LevelConfig::compact()).unwrap();
        group.bench_with_input(
            BenchmarkId::new("render", if colored { "colored" } else { "plain" }),
            &formatter,
            |b, formatter| b.iter(|| black_box(formatter.render(black_box(&record)))),
        );
    }

    group.finish();
}

// ============================================================================
// File Logging Benchmarks
// ============================================================================

fn bench_file_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_logging");
    group.throughput(Throughput::Elements(1));
    let rt = runtime();

    for flush_every_n_logs in [1usize, 64, 1024] {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let logger = Logger::builder()
            .console(ConsoleConfig {
                enabled: false,
                ..ConsoleConfig::default()
            })
            .file(FileConfig {
                enabled: true,
                log_root_path: temp_dir.path().to_path_buf(),
                log_append_time: false,
                flush_every_n_logs,
                ..FileConfig::default()
            })
            .build()
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("flush_every", flush_every_n_logs),
            &logger,
            |b, logger| {
                b.iter(|| {
                    rt.block_on(logger.info(black_box("benchmark message")))
                        .unwrap()
                });
            },
        );

        rt.block_on(logger.close()).unwrap();
    }

    group.finish();
}

criterion_group!(benches, bench_styling, bench_formatting, bench_file_logging);
criterion_main!(benches);
