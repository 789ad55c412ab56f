//! Benchmarks for hard-clip distortion.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::distortion;

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("distort", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                distortion::distort(black_box(&mut buffer), black_box(0.3));
            })
        });
    }

    group.finish();
}
