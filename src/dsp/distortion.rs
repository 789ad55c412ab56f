//! Distortion / Waveshaping
//!
//! Distortion adds harmonics by reshaping the waveform. The "drive" parameter
//! controls how aggressively the signal is pushed into the nonlinear region.
//!
//! # Hard Clip
//!
//!   f(x) = clamp(x * drive, -threshold, threshold)
//!
//!   - Harsh, buzzy distortion
//!   - Creates odd harmonics (like square wave)
//!   - Think: guitar fuzz pedal
//!
//! # Gain Control
//!
//! The distortion knob arrives as a gain in [0, 1] and is scaled by
//! [`GAIN_SCALE`] before clipping, so:
//!
//!   0.05 = drive 1.0, clean for a normalized signal
//!   0.25 = drive 5.0, obvious distortion
//!   1.0  = drive 20.0, close to a square wave

/// Multiplier applied to the distortion knob to get the clipping drive.
pub const GAIN_SCALE: f32 = 20.0;

/// Hard clipping - simply clamps the signal at a threshold.
///
/// Creates harsh, buzzy distortion rich in odd harmonics.
/// Lower threshold = more distortion.
#[inline]
pub fn hard_clip(sample: f32, drive: f32, threshold: f32) -> f32 {
    let x = sample * drive;
    x.clamp(-threshold, threshold)
}

/// Apply hard clipping to an entire buffer in place.
pub fn hard_clip_buffer(buffer: &mut [f32], drive: f32, threshold: f32) {
    for sample in buffer.iter_mut() {
        *sample = hard_clip(*sample, drive, threshold);
    }
}

/// Distortion stage: drive by `gain * GAIN_SCALE`, clip to [-1, 1].
pub fn distort(buffer: &mut [f32], gain: f32) {
    hard_clip_buffer(buffer, gain * GAIN_SCALE, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_clip_below_threshold() {
        let output = hard_clip(0.3, 1.0, 1.0);
        assert!((output - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_hard_clip_above_threshold() {
        let output = hard_clip(0.8, 2.0, 1.0);
        // 0.8 * 2 = 1.6, clamped to 1.0
        assert!((output - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distort_matches_clip_formula() {
        let input: Vec<f32> = (0..64).map(|i| (i as f32 * 0.2).sin() * 1.5).collect();
        for &gain in &[0.01, 0.05, 0.3, 1.0] {
            let mut buffer = input.clone();
            distort(&mut buffer, gain);
            for (out, x) in buffer.iter().zip(&input) {
                let expected = (x * 20.0 * gain).clamp(-1.0, 1.0);
                assert!(out.abs() <= 1.0);
                assert!((out - expected).abs() < 1e-6);
            }
        }
    }
}
