use std::f64::consts::TAU;

use crate::dsp::interpolate::sample_linear;

/*
Vibrato
=======

Vibrato wobbles pitch by reading the buffer along a time axis that speeds up
and slows down with a low frequency oscillator:

    read_time(t) = t + amplitude * sin(TAU * rate * t + lfo_phase)

When read_time runs ahead of t the waveform is squeezed (pitch up), when it
lags the waveform is stretched (pitch down). The amplitude is a time offset
in seconds, 1 ms by default, which keeps the detune subtle.

Rate
----

The depth knob sets the LFO rate exponentially:

    rate = 2^(8 * depth) Hz

    depth 0.0   ->   1 Hz   slow drift
    depth 0.25  ->   4 Hz   classic vibrato
    depth 0.5   ->  16 Hz   flutter
    depth 1.0   -> 256 Hz   audio-rate, FM-like sidebands

Continuity
----------

The LFO phase persists across buffers and is advanced by one buffer
duration after each call, so the wobble does not restart at every buffer
seam. Reads are clamped at the buffer edges; they never look into the
previous or next buffer.
*/

/// Default time-warp amplitude in seconds.
pub const DEFAULT_AMPLITUDE: f32 = 0.001;

/// LFO rate in Hz for a depth knob value in [0, 1].
#[inline]
pub fn rate_for_depth(depth: f32) -> f32 {
    2.0_f32.powf(8.0 * depth)
}

/// Time-warping vibrato with a free-running LFO.
pub struct Vibrato {
    sample_rate: f32,
    duration: f32,
    amplitude: f32,
    lfo_phase: f64,
    dry: Vec<f32>,
}

impl Vibrato {
    /// `duration` is the nominal length of one buffer in seconds.
    pub fn new(sample_rate: f32, duration: f32) -> Self {
        Self {
            sample_rate,
            duration,
            amplitude: DEFAULT_AMPLITUDE,
            lfo_phase: 0.0,
            dry: Vec::new(),
        }
    }

    /// Set the time-warp amplitude in seconds.
    pub fn with_amplitude(mut self, seconds: f32) -> Self {
        self.amplitude = seconds.max(0.0);
        self
    }

    /// Current LFO phase in [0, TAU).
    pub fn lfo_phase(&self) -> f64 {
        self.lfo_phase
    }

    pub fn process(&mut self, buffer: &mut [f32], depth: f32) {
        let rate = rate_for_depth(depth) as f64;

        self.dry.clear();
        self.dry.extend_from_slice(buffer);

        let sample_rate = self.sample_rate as f64;
        let amplitude = self.amplitude as f64;
        for (i, sample) in buffer.iter_mut().enumerate() {
            let t = i as f64 / sample_rate;
            let offset = amplitude * (TAU * rate * t + self.lfo_phase).sin();
            let position = (t + offset) * sample_rate;
            *sample = sample_linear(&self.dry, position as f32);
        }

        self.lfo_phase = (self.lfo_phase + TAU * self.duration as f64 * rate).rem_euclid(TAU);
    }
}
