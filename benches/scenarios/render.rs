//! Benchmarks for additive chord rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::dsp::Waveform;
use saavy_keys::io::note_to_frequency;
use saavy_keys::synth::{Note, Synthesizer};
use saavy_keys::{EngineConfig, Normalization};

/// Chord sizes: a single key, a four-note chord, both hands.
const CHORDS: &[usize] = &[1, 4, 8];

fn chord(size: usize) -> Vec<Note> {
    (0..size)
        .filter_map(|i| note_to_frequency(48 + 4 * i as u8))
        .map(Note::new)
        .collect()
}

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    for normalization in [Normalization::Final, Normalization::PerNote] {
        let config = EngineConfig {
            normalization,
            ..EngineConfig::default()
        };
        let mut synth = Synthesizer::new(&config);
        let mut buffer = vec![0.0f32; synth.frames()];
        let name = format!("{normalization:?}").to_lowercase();

        for &size in CHORDS {
            let mut notes = chord(size);
            group.bench_with_input(BenchmarkId::new(&name, size), &size, |b, _| {
                b.iter(|| {
                    synth.render_into(
                        black_box(&mut notes),
                        Waveform::Sawtooth,
                        black_box(&mut buffer),
                    );
                })
            });
        }
    }

    group.finish();
}
