use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::dsp::interpolate::sample_linear;

/*
Spectral Pitch Shift
====================

Moves every frequency component of a buffer up or down by a constant ratio
by stretching its spectrum rather than its waveform.

How It Works
------------

1. FFT the buffer into N complex bins.
2. Split each bin into magnitude and phase.
3. Build a new spectrum where output bin `k` takes the magnitude and phase
   found at bin `k / factor` of the original (linear interpolation between
   neighbouring bins, clamped at the top bin).
4. Recombine magnitude and phase, inverse FFT, keep the real part, clip.

    factor 1.0  = unchanged
    factor 1.12 = about two semitones up
    factor 0.88 = about two semitones down

Trade-offs
----------

This is a one-shot spectral resample: no time-stretch, no phase vocoder,
no overlap-add. It is cheap and stateless per buffer, and it smears
transients and partials at large factors. The knob range is kept narrow
(see `DEFAULT_RANGE`) so the artefacts stay tolerable.

The whole spectrum is stretched, negative-frequency half included, so the
result is not conjugate-symmetric. The imaginary part of the inverse
transform is discarded.
*/

/// Ratio change at full knob travel: 2^(1/6) - 1, a whole tone.
pub const DEFAULT_RANGE: f32 = 0.122462;

/// Map a pitch-shift amount in [-1, 1] onto a frequency ratio.
#[inline]
pub fn shift_factor(amount: f32, range: f32) -> f32 {
    1.0 + amount * range
}

/// FFT-based pitch shifter with preallocated working buffers.
pub struct PitchShifter {
    planner: FftPlanner<f32>,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    spectrum: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    magnitudes: Vec<f32>,
    phases: Vec<f32>,
}

impl PitchShifter {
    /// Create a shifter planned for buffers of `len` samples.
    ///
    /// Other lengths still work; the plans are rebuilt on first use.
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        Self {
            planner,
            forward,
            inverse,
            spectrum: vec![Complex::new(0.0, 0.0); len],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            magnitudes: vec![0.0; len],
            phases: vec![0.0; len],
        }
    }

    /// Length the current FFT plans were built for.
    pub fn len(&self) -> usize {
        self.spectrum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectrum.is_empty()
    }

    fn replan(&mut self, len: usize) {
        self.forward = self.planner.plan_fft_forward(len);
        self.inverse = self.planner.plan_fft_inverse(len);
        let scratch_len = self
            .forward
            .get_inplace_scratch_len()
            .max(self.inverse.get_inplace_scratch_len());
        self.spectrum.resize(len, Complex::new(0.0, 0.0));
        self.scratch.resize(scratch_len, Complex::new(0.0, 0.0));
        self.magnitudes.resize(len, 0.0);
        self.phases.resize(len, 0.0);
    }

    /// Shift `buffer` in place by `factor`. Output is clipped to [-1, 1].
    ///
    /// Non-positive or non-finite factors leave the buffer untouched.
    pub fn process(&mut self, buffer: &mut [f32], factor: f32) {
        if buffer.is_empty() || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        if buffer.len() != self.spectrum.len() {
            self.replan(buffer.len());
        }

        for (bin, &sample) in self.spectrum.iter_mut().zip(buffer.iter()) {
            *bin = Complex::new(sample, 0.0);
        }
        self.forward
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        for ((bin, magnitude), phase) in self
            .spectrum
            .iter()
            .zip(self.magnitudes.iter_mut())
            .zip(self.phases.iter_mut())
        {
            *magnitude = bin.norm();
            *phase = bin.arg();
        }

        for (k, bin) in self.spectrum.iter_mut().enumerate() {
            let source = k as f32 / factor;
            let magnitude = sample_linear(&self.magnitudes, source);
            let phase = sample_linear(&self.phases, source);
            *bin = Complex::from_polar(magnitude, phase);
        }

        self.inverse
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        // rustfft leaves the inverse unnormalized
        let scale = 1.0 / buffer.len() as f32;
        for (sample, bin) in buffer.iter_mut().zip(self.spectrum.iter()) {
            *sample = (bin.re * scale).clamp(-1.0, 1.0);
        }
    }
}
