//! Benchmark – `jsmin::Minifier`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsmin::{Minifier, MinifyOptions};

const UNIT: &str = r#"/**
 * Formats a price for display.
 */
function formatPrice(amount, currency) {
    // Guard against missing input.
    if (amount == null) {
        return '';
    }
    var fixed = (Math.round(amount * 100) / 100).toFixed(2);
    var parts = fixed.split(/\./);
    return currency + " " + parts[0].replace(/\B(?=(\d{3})+(?!\d))/g, ",") + "." + parts[1];
}

"#;

/// Repeat `UNIT` until the source is at least `target_len` bytes long.
fn make_source(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + UNIT.len());
    while s.len() < target_len {
        s.push_str(UNIT);
    }
    s
}

fn bench_minify(c: &mut Criterion) {
    let mut group = c.benchmark_group("minify");
    for size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        let source = make_source(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        for (name, options) in [
            ("default", MinifyOptions::default()),
            (
                "collapse",
                MinifyOptions {
                    collapse_comment_line_breaks: true,
                    ..Default::default()
                },
            ),
        ] {
            let minifier = Minifier::new(options);
            group.bench_with_input(BenchmarkId::new(name, size), &source, |b, src| {
                let mut out = Vec::with_capacity(src.len());
                b.iter(|| {
                    out.clear();
                    let stats = minifier
                        .minify(black_box(src.as_bytes()), &mut out)
                        .expect("benchmark source is valid");
                    black_box(stats.bytes_written)
                });
            });
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_minify }
criterion_main!(benches);
