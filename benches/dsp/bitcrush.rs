//! Benchmarks for bit-depth reduction.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::bitcrush;

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_bitcrush(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/bitcrush");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("crush", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                bitcrush::crush(black_box(&mut buffer), black_box(0.6));
            })
        });
    }

    group.finish();
}
