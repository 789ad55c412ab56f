//! Benchmarks for the FFT pitch shifter.
//!
//! 2646 = 2 * 3^3 * 7^2, so rustfft uses mixed-radix plans; the power of
//! two sizes show the best case.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::pitch_shift::PitchShifter;

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_pitch_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/pitch_shift");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();
        let mut shifter = PitchShifter::new(size);
        group.bench_with_input(BenchmarkId::new("up_whole_tone", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                shifter.process(black_box(&mut buffer), black_box(1.122462));
            })
        });
    }

    group.finish();
}
