//! Parser and loader performance benchmarks.
//!
//! Measures parsing across input sizes and delimiters, and bulk loading into
//! an in-memory database across batch sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tabload::{BulkLoader, LoaderConfig, Parser, SourceKind, SqliteEngine, compile};

/// Generate synthetic TSV data with the specified number of rows and columns.
fn generate_tsv_data(rows: usize, cols: usize) -> String {
    let mut data = String::new();

    // Header row
    for i in 0..cols {
        if i > 0 {
            data.push('\t');
        }
        data.push_str(&format!("column_{}", i + 1));
    }
    data.push('\n');

    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                data.push('\t');
            }
            match col % 4 {
                0 => data.push_str(&format!("ID_{:06}", row)),
                1 => data.push_str(&format!("{:.2}", row as f64 * 1.5)),
                2 => data.push_str(&format!("O'Title {}", row % 10)),
                3 => data.push_str(&format!("2023-{:02}-{:02}", (row % 12) + 1, (row % 28) + 1)),
                _ => unreachable!(),
            }
        }
        data.push('\n');
    }

    data
}

/// Generate synthetic CSV data.
fn generate_csv_data(rows: usize, cols: usize) -> String {
    generate_tsv_data(rows, cols).replace('\t', ",")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for rows in [100, 1_000, 10_000].iter() {
        for (kind, data) in [
            (SourceKind::Tsv, generate_tsv_data(*rows, 10)),
            (SourceKind::Csv, generate_csv_data(*rows, 10)),
        ] {
            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(BenchmarkId::new(kind.as_str(), rows), &data, |b, data| {
                let parser = Parser::for_kind(kind);
                b.iter(|| black_box(parser.parse(Some(data.as_str()))))
            });
        }
    }

    group.finish();
}

fn bench_parse_column_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_column_scaling");

    for cols in [5, 10, 20, 50].iter() {
        let data = generate_tsv_data(1_000, *cols);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("cols", cols), &data, |b, data| {
            let parser = Parser::for_kind(SourceKind::Tsv);
            b.iter(|| black_box(parser.parse(Some(data.as_str()))))
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let table = Parser::for_kind(SourceKind::Tsv).parse(Some(generate_tsv_data(5_000, 10).as_str()));
    let schema = compile("bench", &table.headers, None).schema;

    group.throughput(Throughput::Elements(table.row_count() as u64));
    for batch_size in [1, 100, 500, 5_000].iter() {
        group.bench_with_input(BenchmarkId::new("batch", batch_size), batch_size, |b, &batch_size| {
            let loader = BulkLoader::with_config(LoaderConfig { batch_size });
            b.iter_with_setup(
                || SqliteEngine::open_in_memory().unwrap(),
                |mut engine| black_box(loader.load(&mut engine, &schema, &table.rows).unwrap()),
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_parse_column_scaling, bench_load);
criterion_main!(benches);
