#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::pitch_shift::PitchShifter;

/*
Buffer Chorus
=============

Thickens a sound by layering detuned, delayed copies of it under the dry
signal, so one voice sounds like several players that are not quite in tune
or in time.

How It Works
------------

For each voice:
  1. Copy the buffer and pitch-shift the copy by a small ratio (1% and 3%
     by default).
  2. Rotate the copy forward by a fixed number of samples, standing in for
     a delay line.

Then mix:

    out = dry * (1 - mix) + voice_a * (mix / 2) + voice_b * (mix / 2)

The weights always sum to 1.0, so a normalized input stays normalized.

Boundary Artefact
-----------------

The rotation wraps: samples pushed off the end of the buffer reappear at
the start instead of arriving in the next buffer. With 60 ms buffers and
delays of 11-45 ms this is heard as extra texture rather than as an echo.
*/

/// One detuned, delayed copy.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChorusVoice {
    /// Pitch ratio applied to the copy.
    pub factor: f32,
    /// Circular delay in samples.
    pub offset: usize,
}

/// The two copies used by default.
pub const DEFAULT_VOICES: [ChorusVoice; 2] = [
    ChorusVoice {
        factor: 1.01,
        offset: 2000,
    },
    ChorusVoice {
        factor: 1.03,
        offset: 500,
    },
];

/// Two-voice chorus built from the spectral pitch shifter.
pub struct Chorus {
    voices: [ChorusVoice; 2],
    shifter: PitchShifter,
    copy_a: Vec<f32>,
    copy_b: Vec<f32>,
}

impl Chorus {
    pub fn new(len: usize) -> Self {
        Self::with_voices(len, DEFAULT_VOICES)
    }

    pub fn with_voices(len: usize, voices: [ChorusVoice; 2]) -> Self {
        Self {
            voices,
            shifter: PitchShifter::new(len),
            copy_a: Vec::with_capacity(len),
            copy_b: Vec::with_capacity(len),
        }
    }

    pub fn voices(&self) -> &[ChorusVoice; 2] {
        &self.voices
    }

    pub fn process(&mut self, buffer: &mut [f32], mix: f32) {
        if buffer.is_empty() {
            return;
        }
        let mix = mix.clamp(0.0, 1.0);
        let [voice_a, voice_b] = self.voices;

        render_voice(&mut self.shifter, &mut self.copy_a, buffer, voice_a);
        render_voice(&mut self.shifter, &mut self.copy_b, buffer, voice_b);

        let dry_gain = 1.0 - mix;
        let wet_gain = mix / 2.0;
        for ((sample, a), b) in buffer.iter_mut().zip(&self.copy_a).zip(&self.copy_b) {
            *sample = *sample * dry_gain + a * wet_gain + b * wet_gain;
        }
    }
}

fn render_voice(shifter: &mut PitchShifter, copy: &mut Vec<f32>, dry: &[f32], voice: ChorusVoice) {
    copy.clear();
    copy.extend_from_slice(dry);
    shifter.process(copy, voice.factor);
    let len = copy.len();
    copy.rotate_right(voice.offset % len);
}
