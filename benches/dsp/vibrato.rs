//! Benchmarks for time-warp vibrato.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::vibrato::Vibrato;

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_vibrato(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/vibrato");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();
        let mut vibrato = Vibrato::new(SAMPLE_RATE, size as f32 / SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("depth_0.5", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                vibrato.process(black_box(&mut buffer), black_box(0.5));
            })
        });
    }

    group.finish();
}
