use std::sync::atomic::{AtomicBool, Ordering};

use crate::synth::controls::ControlState;
use crate::synth::notes::NoteRegistry;

/// State shared by the MIDI router and the render loop.
///
/// Created once at startup and handed to both workers behind an `Arc`.
/// `shutdown` is the only way either side asks the other to stop.
pub struct EngineContext {
    pub notes: NoteRegistry,
    pub controls: ControlState,
    running: AtomicBool,
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineContext {
    /// No notes held, every control at rest, running.
    pub fn new() -> Self {
        Self {
            notes: NoteRegistry::new(),
            controls: ControlState::new(),
            running: AtomicBool::new(true),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ask both workers to stop. Idempotent.
    pub fn shutdown(&self) {
        self.running.store(false, Ordering::Release);
    }
}
