use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Oscillator Waveforms
====================

Both shapes share one phase convention: `phase` is the oscillator angle in
radians, one full cycle every TAU.

SINE
    sin(phase). Pure tone, no harmonics.

SAWTOOTH
    Linear ramp from -1.0 up to +1.0 over one cycle, then snaps back.
    At phase 0 the ramp sits at -1.0, at phase PI it crosses 0.0.

      +1 |    /|    /|
         |   / |   / |
       0 |  /  |  /  |
         | /   | /   |
      -1 |/    |/    |
         0    TAU   2*TAU

Keeping the convention shared means a note can swap waveforms between
buffers without its stored phase meaning something different.
*/

/// Oscillator shape selected by the waveform toggle channel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Sawtooth,
}

impl Waveform {
    /// Map the binary toggle value (0 or 1) onto a waveform.
    pub fn from_toggle(value: f32) -> Self {
        if value >= 0.5 {
            Waveform::Sawtooth
        } else {
            Waveform::Sine
        }
    }

    /// Inverse of [`Waveform::from_toggle`].
    pub fn toggle_value(self) -> f32 {
        match self {
            Waveform::Sine => 0.0,
            Waveform::Sawtooth => 1.0,
        }
    }

    /// Evaluate the waveform at an arbitrary (unwrapped) phase.
    #[inline]
    pub fn evaluate(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Sawtooth => {
                let cycles = (phase / TAU).rem_euclid(1.0);
                2.0 * cycles - 1.0
            }
        }
    }
}

/// Fill `out` with one segment of `waveform` at `frequency`, starting from
/// `phase`. Sample `i` sits at time `i / sample_rate`.
pub fn render_segment(
    waveform: Waveform,
    frequency: f32,
    phase: f64,
    sample_rate: f32,
    out: &mut [f32],
) {
    let increment = TAU * frequency as f64 / sample_rate as f64;
    for (i, sample) in out.iter_mut().enumerate() {
        *sample = waveform.evaluate(increment * i as f64 + phase) as f32;
    }
}

/// Advance a phase accumulator by `duration` seconds at `frequency`,
/// wrapped into [0, TAU).
#[inline]
pub fn advance_phase(phase: f64, frequency: f32, duration: f32) -> f64 {
    (phase + TAU * frequency as f64 * duration as f64).rem_euclid(TAU)
}
