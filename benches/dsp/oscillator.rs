//! Benchmarks for oscillator segment generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::oscillator::render_segment;
use saavy_keys::dsp::Waveform;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - uses sin() transcendental function
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                render_segment(
                    Waveform::Sine,
                    black_box(440.0),
                    black_box(1.3),
                    SAMPLE_RATE,
                    black_box(&mut buffer),
                );
            })
        });

        // Sawtooth - wrapped linear ramp
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| {
                render_segment(
                    Waveform::Sawtooth,
                    black_box(440.0),
                    black_box(1.3),
                    SAMPLE_RATE,
                    black_box(&mut buffer),
                );
            })
        });
    }

    group.finish();
}
