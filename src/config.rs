#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::chorus::{ChorusVoice, DEFAULT_VOICES};
use crate::dsp::{bitcrush, pitch_shift, vibrato};

/// How the synthesizer keeps a chord of several notes inside [-1, 1].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Divide the finished mix by its peak once.
    #[default]
    Final,
    /// Divide the running mix by its peak after every note is added.
    ///
    /// Order-sensitive: notes added earlier are attenuated more times than
    /// later ones, so the oldest held note ends up quietest.
    PerNote,
}

/// Engine-wide settings, fixed for the lifetime of a run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: f32,
    /// Length of one rendered buffer in seconds.
    pub buffer_duration: f32,
    pub normalization: Normalization,
    /// Frequency-ratio change at full pitch-shift travel.
    pub pitch_shift_range: f32,
    /// Vibrato time-warp amplitude in seconds.
    pub vibrato_amplitude: f32,
    /// Bit depth at crush depth 0.0.
    pub max_bits: u32,
    /// Bit depth at crush depth 1.0.
    pub min_bits: u32,
    pub chorus_voices: [ChorusVoice; 2],
    /// Requested device period in frames. `None` leaves it to the driver.
    pub device_buffer_frames: Option<u32>,
    /// Only route MIDI from this channel (0-15). `None` listens to all.
    pub midi_channel: Option<u8>,
}

impl EngineConfig {
    /// Samples per rendered buffer: round(sample_rate * buffer_duration).
    pub fn frames_per_buffer(&self) -> usize {
        (self.sample_rate as f64 * self.buffer_duration as f64).round() as usize
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: crate::SAMPLE_RATE,
            buffer_duration: crate::BUFFER_DURATION,
            normalization: Normalization::default(),
            pitch_shift_range: pitch_shift::DEFAULT_RANGE,
            vibrato_amplitude: vibrato::DEFAULT_AMPLITUDE,
            max_bits: bitcrush::MAX_BITS,
            min_bits: bitcrush::MIN_BITS,
            chorus_voices: DEFAULT_VOICES,
            device_buffer_frames: None,
            midi_channel: None,
        }
    }
}
