use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::Waveform;

/*
Control Channels
================

    index  channel       range     driven by
    0      Vibrato       [0, 1]    CC 14
    1      Distortion    [0, 1]    CC 15
    2      Chorus        [0, 1]    CC 16
    3      BitCrush      [0, 1]    CC 17
    4      PitchShift    [-1, 1]   CC 18 (knob)
    5      Waveform      {0, 1}    CC 64 (pedal toggle)

Pitch bend is kept in its own slot next to channel 4 instead of
overwriting it. The effect chain reads the sum of knob and bend, clamped
to [-1, 1], so moving the wheel bends around wherever the knob sits and
releasing it returns there.

Each channel is an independent f32 stored as bits in an AtomicU32. A write
replaces one channel in a single store and a read loads each channel once,
so no channel is ever observed half-written. Channels carry no relation to
one another that a reader could see torn.
*/

/// One of the six addressable control channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlChannel {
    Vibrato,
    Distortion,
    Chorus,
    BitCrush,
    PitchShift,
    Waveform,
}

impl ControlChannel {
    pub const COUNT: usize = 6;

    pub const ALL: [ControlChannel; Self::COUNT] = [
        ControlChannel::Vibrato,
        ControlChannel::Distortion,
        ControlChannel::Chorus,
        ControlChannel::BitCrush,
        ControlChannel::PitchShift,
        ControlChannel::Waveform,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Bring `value` into this channel's range.
    ///
    /// The waveform channel snaps to 0 or 1; NaN reads as 0.
    pub fn constrain(self, value: f32) -> f32 {
        let value = if value.is_nan() { 0.0 } else { value };
        match self {
            ControlChannel::PitchShift => value.clamp(-1.0, 1.0),
            ControlChannel::Waveform => {
                if value >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            _ => value.clamp(0.0, 1.0),
        }
    }
}

/// Point-in-time copy of every control value, read once per buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlSnapshot {
    pub vibrato: f32,
    pub distortion: f32,
    pub chorus: f32,
    pub bit_crush: f32,
    /// Pitch-shift knob position.
    pub pitch_shift: f32,
    /// Pitch-wheel position.
    pub pitch_bend: f32,
    pub waveform: Waveform,
}

impl ControlSnapshot {
    /// Effective pitch-shift amount: knob plus bend, clamped to [-1, 1].
    pub fn pitch_amount(&self) -> f32 {
        (self.pitch_shift + self.pitch_bend).clamp(-1.0, 1.0)
    }

    /// Values in channel order. Channel 4 reports the knob only.
    pub fn channels(&self) -> [f32; ControlChannel::COUNT] {
        [
            self.vibrato,
            self.distortion,
            self.chorus,
            self.bit_crush,
            self.pitch_shift,
            self.waveform.toggle_value(),
        ]
    }
}

/// Lock-free store for the control channels plus the pitch wheel.
pub struct ControlState {
    channels: [AtomicU32; ControlChannel::COUNT],
    pitch_bend: AtomicU32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlState {
    /// All channels at 0: every effect bypassed, sine waveform.
    pub fn new() -> Self {
        let zero = 0.0_f32.to_bits();
        Self {
            channels: std::array::from_fn(|_| AtomicU32::new(zero)),
            pitch_bend: AtomicU32::new(zero),
        }
    }

    /// Store `value`, constrained to the channel's range. Returns the
    /// stored value.
    pub fn set(&self, channel: ControlChannel, value: f32) -> f32 {
        let value = channel.constrain(value);
        self.channels[channel.index()].store(value.to_bits(), Ordering::Relaxed);
        value
    }

    pub fn get(&self, channel: ControlChannel) -> f32 {
        f32::from_bits(self.channels[channel.index()].load(Ordering::Relaxed))
    }

    /// Index-addressed write. Indices outside 0..6 are rejected with
    /// `None` and change nothing.
    pub fn set_channel(&self, index: usize, value: f32) -> Option<f32> {
        ControlChannel::from_index(index).map(|channel| self.set(channel, value))
    }

    pub fn set_waveform(&self, waveform: Waveform) {
        self.set(ControlChannel::Waveform, waveform.toggle_value());
    }

    pub fn waveform(&self) -> Waveform {
        Waveform::from_toggle(self.get(ControlChannel::Waveform))
    }

    /// Store the pitch-wheel position, clamped to [-1, 1].
    pub fn set_pitch_bend(&self, value: f32) -> f32 {
        let value = if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) };
        self.pitch_bend.store(value.to_bits(), Ordering::Relaxed);
        value
    }

    pub fn pitch_bend(&self) -> f32 {
        f32::from_bits(self.pitch_bend.load(Ordering::Relaxed))
    }

    pub fn read_all(&self) -> ControlSnapshot {
        ControlSnapshot {
            vibrato: self.get(ControlChannel::Vibrato),
            distortion: self.get(ControlChannel::Distortion),
            chorus: self.get(ControlChannel::Chorus),
            bit_crush: self.get(ControlChannel::BitCrush),
            pitch_shift: self.get(ControlChannel::PitchShift),
            pitch_bend: self.pitch_bend(),
            waveform: self.waveform(),
        }
    }
}
