use crate::config::{EngineConfig, Normalization};
use crate::dsp::oscillator::{advance_phase, render_segment};
use crate::dsp::Waveform;
use crate::synth::notes::Note;

/*
Additive Note Rendering
=======================

Every held note contributes one oscillator segment, the segments are summed,
and the sum is scaled back into range:

    sum[i] = sum over notes of wave(TAU * f * t_i + phase_note)
    t_i    = i / sample_rate

    Final:    out = sum / peak(|sum|)            (once)
    PerNote:  after each note is added, sum = sum / peak(|sum|)

then hard-clipped to [-1, 1]. With a single note both modes leave a full
scale waveform. With a chord, PerNote divides the first note's contribution
once per later note, so press order changes the balance.

Phase
-----

Each note's phase is advanced by TAU * f * duration (wrapped) after its
segment is rendered. The next buffer starts exactly where this one ended,
so there is no click at the seam.
*/

/// A rendered block of float samples, nominally in [-1, 1].
pub type AudioBuffer = Vec<f32>;

/// Renders and mixes oscillators for a set of held notes.
pub struct Synthesizer {
    sample_rate: f32,
    duration: f32,
    frames: usize,
    normalization: Normalization,
    segment: Vec<f32>,
}

impl Synthesizer {
    pub fn new(config: &EngineConfig) -> Self {
        let frames = config.frames_per_buffer();
        Self {
            sample_rate: config.sample_rate,
            duration: config.buffer_duration,
            frames,
            normalization: config.normalization,
            segment: vec![0.0; frames],
        }
    }

    /// Samples per rendered buffer.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Render one buffer for `notes`, advancing each note's phase.
    pub fn render(&mut self, notes: &mut [Note], waveform: Waveform) -> AudioBuffer {
        let mut out = vec![0.0; self.frames];
        self.render_into(notes, waveform, &mut out);
        out
    }

    /// Render into `out`, which must be `frames()` long. With no notes the
    /// buffer is filled with silence.
    pub fn render_into(&mut self, notes: &mut [Note], waveform: Waveform, out: &mut [f32]) {
        out.fill(0.0);
        if notes.is_empty() {
            return;
        }
        if self.segment.len() < out.len() {
            self.segment.resize(out.len(), 0.0);
        }

        for note in notes.iter_mut() {
            render_segment(
                waveform,
                note.frequency,
                note.phase,
                self.sample_rate,
                &mut self.segment[..out.len()],
            );
            for (o, s) in out.iter_mut().zip(&self.segment) {
                *o += s;
            }
            note.phase = advance_phase(note.phase, note.frequency, self.duration);

            if self.normalization == Normalization::PerNote {
                normalize_peak(out);
            }
        }

        if self.normalization == Normalization::Final {
            normalize_peak(out);
        }
        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }
}

/// Divide by the peak absolute value. Silent buffers are left alone.
pub fn normalize_peak(buffer: &mut [f32]) {
    let peak = buffer.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
    if peak > f32::EPSILON {
        for sample in buffer.iter_mut() {
            *sample /= peak;
        }
    }
}
