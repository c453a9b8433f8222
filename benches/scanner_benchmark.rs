use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use srchash::{scan, PaddedBuffer};

/// A few KB of plausible C/C++ source with no temporal macros, repeated to
/// the requested size, so the scanner has to walk the whole buffer without
/// ever short-circuiting on a match.
fn generate_source(size_mb: usize) -> Vec<u8> {
    let line = b"int compute(int x) { return x * 2 + 1; } // nothing interesting here\n";
    let mut data = Vec::with_capacity(size_mb * 1024 * 1024);
    while data.len() < size_mb * 1024 * 1024 {
        data.extend_from_slice(line);
    }
    data
}

fn bench_scan_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_no_macros");
    for size_mb in [1, 10, 100] {
        let data = generate_source(size_mb);
        let buf = PaddedBuffer::from_bytes(&data);
        group.bench_with_input(
            BenchmarkId::new("scan", format!("{size_mb}MB")),
            &buf,
            |b, buf| b.iter(|| scan(black_box(buf))),
        );
    }
    group.finish();
}

fn bench_scan_with_macro_at_end(c: &mut Criterion) {
    let mut data = generate_source(10);
    data.extend_from_slice(b"const char *build_date = __DATE__;\n");
    let buf = PaddedBuffer::from_bytes(&data);
    c.bench_function("scan_macro_at_end_10MB", |b| {
        b.iter(|| scan(black_box(&buf)))
    });
}

fn bench_scan_small(c: &mut Criterion) {
    let buf = PaddedBuffer::from_bytes(b"int x = 1; // __DATE__\n");
    c.bench_function("scan_small_buffer", |b| {
        b.iter(|| scan(black_box(&buf)))
    });
}

criterion_group!(
    benches,
    bench_scan_clean,
    bench_scan_with_macro_at_end,
    bench_scan_small,
);
criterion_main!(benches);
