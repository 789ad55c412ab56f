// Purpose: held notes, control values, MIDI routing and additive rendering.
// This layer sits between the io adapters and the engine loop.

pub mod context;
pub mod controls;
pub mod notes;
pub mod render;
pub mod router;

pub use context::EngineContext;
pub use controls::{ControlChannel, ControlSnapshot, ControlState};
pub use notes::{Note, NoteRegistry};
pub use render::{AudioBuffer, Synthesizer};
pub use router::{IgnoreReason, MidiRouter, Route};
