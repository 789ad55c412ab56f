//! Benchmarks for single DSP stages.

mod bitcrush;
mod chorus;
mod distortion;
mod oscillator;
mod pitch_shift;
mod vibrato;

pub use bitcrush::bench_bitcrush;
pub use chorus::bench_chorus;
pub use distortion::bench_distortion;
pub use oscillator::bench_oscillator;
pub use pitch_shift::bench_pitch_shift;
pub use vibrato::bench_vibrato;
