//! Low-level DSP primitives used by the synthesizer and the effect chain.
//!
//! Everything here works on plain `&mut [f32]` buffers. Stateful effects
//! (pitch shifter, chorus, vibrato) preallocate their working memory and
//! only grow it when the buffer length changes, so steady-state rendering
//! does not allocate.

/// Quantization to a reduced bit depth.
pub mod bitcrush;
/// Two-voice chorus from pitch-shifted, rotated copies.
pub mod chorus;
/// Hard-clip waveshaping.
pub mod distortion;
/// Fractional reads with linear interpolation.
pub mod interpolate;
/// Sine and sawtooth evaluation plus phase bookkeeping.
pub mod oscillator;
/// FFT spectral-resampling pitch shifter.
pub mod pitch_shift;
/// Time-warping vibrato with a persistent LFO.
pub mod vibrato;

pub use oscillator::Waveform;
