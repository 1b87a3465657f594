use byterace::{ByteStream, RaceScanner};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;

const MARKER: u8 = b'A';

/// Random lowercase content with the marker planted at `marker_at`.
fn generate_file(size: usize, marker_at: Option<usize>) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data: Vec<u8> =
        (0..size).map(|_| rng.gen_range(b'a'..=b'z')).collect();
    if let Some(offset) = marker_at {
        data[offset] = MARKER;
    }
    data
}

fn scanner_over(files: &[Vec<u8>]) -> RaceScanner {
    let streams: HashMap<String, ByteStream> = files
        .iter()
        .enumerate()
        .map(|(i, data)| {
            (i.to_string(), ByteStream::new(Cursor::new(data.clone())))
        })
        .collect();
    RaceScanner::new(streams)
}

fn race_scan_benchmark(c: &mut Criterion) {
    let runtime =
        tokio::runtime::Runtime::new().expect("Unable to create a runtime");
    let inputs = [
        ("race_scan_small", 4, 256),
        ("race_scan_medium", 16, 1024),
        ("race_scan_wide", 64, 1024),
    ];

    for (name, streams, size) in inputs.iter() {
        let files: Vec<Vec<u8>> = (0..*streams)
            .map(|i| generate_file(*size, (i % 4 == 0).then_some(size / 2)))
            .collect();
        let mut group = c.benchmark_group(name.to_string());
        group.measurement_time(std::time::Duration::from_secs(5));

        group.bench_function("scan", |b| {
            b.to_async(&runtime).iter(|| async {
                let mut scanner = scanner_over(&files);
                black_box(scanner.scan(black_box(MARKER)).await)
            });
        });

        group.finish();
    }
}

criterion_group!(benches, race_scan_benchmark);
criterion_main!(benches);
