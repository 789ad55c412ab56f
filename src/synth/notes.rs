use std::sync::{Mutex, MutexGuard, PoisonError};

/// A held key: its frequency and the oscillator phase carried between
/// buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f32,
    /// Oscillator phase in [0, TAU).
    pub phase: f64,
    /// Distinguishes this press from a later press of the same key.
    serial: u64,
}

impl Note {
    /// A fresh note at phase 0, not tied to any registry entry.
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
            serial: 0,
        }
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }
}

#[derive(Default)]
struct Inner {
    /// Insertion order is kept; per-note normalization depends on it.
    notes: Vec<Note>,
    next_serial: u64,
}

/// The set of sounding notes, shared between the MIDI router and the
/// render loop.
///
/// One mutex covers the whole set. Every insert, removal, snapshot and
/// phase commit takes it, so a reader never sees a half-applied change.
#[derive(Default)]
pub struct NoteRegistry {
    inner: Mutex<Inner>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every mutation is a single Vec operation, so a panicking holder
        // cannot leave the set half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start `frequency` at phase 0. Returns false if it is already held;
    /// a repeated press neither retriggers nor resets the phase.
    pub fn note_on(&self, frequency: f32) -> bool {
        let mut inner = self.lock();
        if inner.notes.iter().any(|n| n.frequency == frequency) {
            return false;
        }
        inner.next_serial += 1;
        let serial = inner.next_serial;
        inner.notes.push(Note {
            frequency,
            phase: 0.0,
            serial,
        });
        true
    }

    /// Stop `frequency`. Returns false if it was not held.
    pub fn note_off(&self, frequency: f32) -> bool {
        let mut inner = self.lock();
        let before = inner.notes.len();
        inner.notes.retain(|n| n.frequency != frequency);
        inner.notes.len() != before
    }

    /// Consistent copy of the held notes, in the order they were pressed.
    pub fn snapshot(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    /// Like [`NoteRegistry::snapshot`], reusing `out`'s allocation.
    pub fn snapshot_into(&self, out: &mut Vec<Note>) {
        let inner = self.lock();
        out.clear();
        out.extend_from_slice(&inner.notes);
    }

    /// Write advanced phases back from a rendered snapshot.
    ///
    /// Only notes still held from the same press are updated. Notes
    /// released while the buffer rendered stay released, and a key pressed
    /// again in that window keeps its fresh phase.
    pub fn commit_phases(&self, rendered: &[Note]) {
        let mut inner = self.lock();
        for note in inner.notes.iter_mut() {
            if let Some(done) = rendered.iter().find(|r| r.serial == note.serial) {
                note.phase = done.phase;
            }
        }
    }

    /// Stored phase of `frequency`, if held.
    pub fn phase_of(&self, frequency: f32) -> Option<f64> {
        self.lock()
            .notes
            .iter()
            .find(|n| n.frequency == frequency)
            .map(|n| n.phase)
    }

    pub fn frequencies(&self) -> Vec<f32> {
        self.lock().notes.iter().map(|n| n.frequency).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().notes.is_empty()
    }
}
