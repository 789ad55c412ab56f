//! Benchmarks for the effect chain and a full engine cycle.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use saavy_keys::effects::EffectChain;
use saavy_keys::io::note_to_frequency;
use saavy_keys::synth::ControlSnapshot;
use saavy_keys::{AudioEngine, EngineConfig, EngineContext};

use crate::test_signal;

pub fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chain");
    let config = EngineConfig::default();
    let frames = config.frames_per_buffer();

    // === EVERY STAGE ENGAGED ===
    // Worst case: three FFT round trips plus the cheap stages
    let all = ControlSnapshot {
        vibrato: 0.3,
        distortion: 0.1,
        chorus: 0.5,
        bit_crush: 0.2,
        pitch_shift: 0.4,
        ..Default::default()
    };
    let input = test_signal(frames);
    let mut buffer = input.clone();
    let mut chain = EffectChain::new(&config);
    group.bench_with_input(BenchmarkId::new("all_stages", frames), &frames, |b, _| {
        b.iter(|| {
            buffer.copy_from_slice(&input);
            chain.process(black_box(&mut buffer), black_box(&all));
        })
    });

    // === ENGINE CYCLE ===
    // Snapshot, render a triad, run the chain, convert to PCM
    let context = Arc::new(EngineContext::new());
    for key in [60, 64, 67] {
        if let Some(frequency) = note_to_frequency(key) {
            context.notes.note_on(frequency);
        }
    }
    context.controls.set_pitch_bend(0.25);
    let mut engine = AudioEngine::new(context, &config);
    group.bench_with_input(BenchmarkId::new("engine_cycle", frames), &frames, |b, _| {
        b.iter(|| {
            black_box(engine.render_cycle());
        })
    });

    group.finish();
}
