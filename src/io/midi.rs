use std::sync::mpsc::Receiver;

use crate::error::InputError;

/// Channel-voice MIDI messages the synthesizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Signed 14-bit bend, -8192..=8191 with 0 at rest.
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// Parse one raw message. Returns `None` for truncated messages and
    /// for statuses the synthesizer has no use for (aftertouch, sysex,
    /// clock).
    ///
    /// A note-on with velocity 0 is reported as a note-off.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        let channel = status & 0x0F;
        let data1 = data.first().map(|b| b & 0x7F);
        let data2 = data.get(1).map(|b| b & 0x7F);

        match (status & 0xF0, data1, data2) {
            (0x90, Some(key), Some(velocity)) if velocity > 0 => Some(MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            }),
            (0x90, Some(key), Some(_)) => Some(MidiEvent::NoteOff {
                channel,
                key,
                velocity: 0,
            }),
            (0x80, Some(key), Some(velocity)) => Some(MidiEvent::NoteOff {
                channel,
                key,
                velocity,
            }),
            (0xB0, Some(controller), Some(value)) => Some(MidiEvent::ControlChange {
                channel,
                controller,
                value,
            }),
            (0xC0, Some(program), _) => Some(MidiEvent::ProgramChange { channel, program }),
            (0xE0, Some(lsb), Some(msb)) => {
                let raw = ((msb as i16) << 7) | lsb as i16;
                Some(MidiEvent::PitchBend {
                    channel,
                    value: raw - 8192,
                })
            }
            _ => None,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::PitchBend { channel, .. }
            | MidiEvent::ProgramChange { channel, .. } => channel,
        }
    }
}

/// A blocking stream of MIDI events.
pub trait EventSource {
    /// Wait for the next event. An error means the stream is finished.
    fn next_event(&mut self) -> Result<MidiEvent, InputError>;
}

impl EventSource for Receiver<MidiEvent> {
    fn next_event(&mut self) -> Result<MidiEvent, InputError> {
        self.recv().map_err(|_| InputError::Disconnected)
    }
}
