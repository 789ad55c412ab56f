use std::sync::Arc;
use tracing::{debug, error, info};

use crate::dsp::Waveform;
use crate::error::InputError;
use crate::io::converter::note_to_frequency;
use crate::io::midi::{EventSource, MidiEvent};
use crate::synth::context::EngineContext;
use crate::synth::controls::ControlChannel;

/*
MIDI Routing
============

    message                     effect
    note-on,  velocity > 0      notes.note_on(freq(key))
    note-on,  velocity 0        notes.note_off(freq(key))
    note-off                    notes.note_off(freq(key))
    CC 64                       waveform = Saw if value == 127 else Sine
    CC 14..=18                  channel (cc - 14) = value / 127
    pitch bend                  bend = value / 8192

Keys outside 21..=96 have no frequency and are dropped. Any controller that
does not land on channels 0-4 is dropped too; channel 5 is reachable only
through CC 64.
*/

/// Controller that toggles the waveform.
pub const WAVEFORM_CONTROLLER: u8 = 64;
/// Controller mapped to channel 0. CC n drives channel n - 14.
pub const FIRST_EFFECT_CONTROLLER: u8 = 14;
/// Pitch-bend value at full deflection.
pub const PITCH_BEND_SPAN: f32 = 8192.0;

/// Why an event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Key outside the frequency table.
    UnresolvableNote,
    /// Controller number with no channel behind it.
    UnmappedControl,
    /// Event on a MIDI channel the router is not listening to.
    OtherChannel,
    /// Message type the synthesizer does not use.
    Unsupported,
}

/// What a routed event did to the shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    NoteOn { frequency: f32 },
    NoteOff { frequency: f32 },
    Control { channel: ControlChannel, value: f32 },
    Waveform(Waveform),
    PitchBend(f32),
    Ignored(IgnoreReason),
}

/// Channel for a controller number, if it drives one of the effects.
pub fn control_channel_for(controller: u8) -> Option<ControlChannel> {
    let index = controller.checked_sub(FIRST_EFFECT_CONTROLLER)?;
    ControlChannel::from_index(index as usize).filter(|channel| *channel != ControlChannel::Waveform)
}

/// Applies MIDI events to the note registry and control state.
pub struct MidiRouter {
    context: Arc<EngineContext>,
    channel: Option<u8>,
}

impl MidiRouter {
    pub fn new(context: Arc<EngineContext>) -> Self {
        Self {
            context,
            channel: None,
        }
    }

    /// Only accept events on `channel` (0-15).
    pub fn with_channel(mut self, channel: Option<u8>) -> Self {
        self.channel = channel;
        self
    }

    /// Apply one event.
    pub fn route(&self, event: MidiEvent) -> Route {
        if self.channel.is_some_and(|channel| channel != event.channel()) {
            return Route::Ignored(IgnoreReason::OtherChannel);
        }

        match event {
            MidiEvent::NoteOn { key, velocity, .. } if velocity > 0 => match note_to_frequency(key) {
                Some(frequency) => {
                    self.context.notes.note_on(frequency);
                    Route::NoteOn { frequency }
                }
                None => Route::Ignored(IgnoreReason::UnresolvableNote),
            },
            MidiEvent::NoteOn { key, .. } | MidiEvent::NoteOff { key, .. } => {
                match note_to_frequency(key) {
                    Some(frequency) => {
                        self.context.notes.note_off(frequency);
                        Route::NoteOff { frequency }
                    }
                    None => Route::Ignored(IgnoreReason::UnresolvableNote),
                }
            }
            MidiEvent::ControlChange {
                controller, value, ..
            } => self.control_change(controller, value),
            MidiEvent::PitchBend { value, .. } => {
                let bend = self.context.controls.set_pitch_bend(value as f32 / PITCH_BEND_SPAN);
                Route::PitchBend(bend)
            }
            MidiEvent::ProgramChange { .. } => Route::Ignored(IgnoreReason::Unsupported),
        }
    }

    fn control_change(&self, controller: u8, value: u8) -> Route {
        if controller == WAVEFORM_CONTROLLER {
            let waveform = if value == 127 {
                Waveform::Sawtooth
            } else {
                Waveform::Sine
            };
            self.context.controls.set_waveform(waveform);
            return Route::Waveform(waveform);
        }

        match control_channel_for(controller) {
            Some(channel) => {
                let value = self.context.controls.set(channel, value as f32 / 127.0);
                Route::Control { channel, value }
            }
            None => Route::Ignored(IgnoreReason::UnmappedControl),
        }
    }

    /// Route events from `source` until it fails or the context shuts down.
    ///
    /// A source error while still running is logged and returned; the
    /// render loop keeps playing whatever state was last written. After
    /// shutdown, the source closing is the expected way out.
    pub fn run<S: EventSource + ?Sized>(&self, source: &mut S) -> Result<(), InputError> {
        info!("MIDI router started");
        while self.context.is_running() {
            let event = match source.next_event() {
                Ok(event) => event,
                Err(e) if self.context.is_running() => {
                    error!("MIDI input failed: {}", e);
                    return Err(e);
                }
                Err(_) => break,
            };

            let route = self.route(event);
            debug!(
                ?event,
                ?route,
                notes = ?self.context.notes.frequencies(),
                controls = ?self.context.controls.read_all(),
                "routed"
            );
        }
        info!("MIDI router stopped");
        Ok(())
    }
}
