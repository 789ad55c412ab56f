//! Benchmarks for the two-voice chorus (two FFT round trips per call).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::chorus::Chorus;

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_chorus(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/chorus");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();
        let mut chorus = Chorus::new(size);
        group.bench_with_input(BenchmarkId::new("half_mix", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                chorus.process(black_box(&mut buffer), black_box(0.5));
            })
        });
    }

    group.finish();
}
