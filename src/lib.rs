pub mod config; // Engine-wide settings
pub mod dsp;
pub mod effects; // Fixed, gated effect chain
pub mod engine; // Render loop
pub mod error;
pub mod io;
#[cfg(feature = "rtrb")]
pub mod runtime; // Live MIDI-in, sound-card-out session
pub mod synth; // Held notes, controls, MIDI routing

pub use config::{EngineConfig, Normalization};
pub use engine::AudioEngine;
pub use synth::{EngineContext, MidiRouter};

/// Output sample rate in Hz.
pub const SAMPLE_RATE: f32 = 44_100.0;
/// Length of one rendered buffer in seconds (2646 samples at 44.1 kHz).
pub const BUFFER_DURATION: f32 = 0.06;
