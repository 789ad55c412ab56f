// Purpose - external interfaces, format conversions

pub mod converter;
#[cfg(feature = "rtrb")]
pub mod cpal_sink;
pub mod midi;
pub mod midi_device;
pub mod sink;

pub use converter::{note_to_frequency, to_pcm16};
#[cfg(feature = "rtrb")]
pub use cpal_sink::CpalSink;
pub use midi::{EventSource, MidiEvent};
pub use midi_device::{list_ports, MidiInputDevice, PortSelector};
pub use sink::{AudioSink, MemorySink};
