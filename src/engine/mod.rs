// Purpose: the render loop. Snapshot, synthesize, process, convert, write.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::EngineConfig;
use crate::effects::EffectChain;
use crate::error::EngineError;
use crate::io::converter::to_pcm16;
use crate::io::sink::AudioSink;
use crate::synth::context::EngineContext;
use crate::synth::notes::Note;
use crate::synth::render::Synthesizer;

/*
Render Cycle
============

    notes.snapshot_into(held)          lock held only for the copy
    controls = controls.read_all()
    synth.render_into(held, ...)       phases advance in `held`
    notes.commit_phases(held)          lock again, write phases back
    effects.process(buffer, controls)
    to_pcm16(buffer, pcm)
    sink.write(pcm)                    blocks; this is the only pacing

Rendering happens outside the registry lock. A key released while its
buffer was rendering is simply not written back; a key pressed meanwhile
starts at phase 0 on the next cycle.

The loop runs until the context is shut down or the sink fails. A sink
failure shuts the context down too, so the router stops with it.
*/

/// Owns the render-side state and drives one sink.
pub struct AudioEngine {
    context: Arc<EngineContext>,
    synth: Synthesizer,
    effects: EffectChain,
    held: Vec<Note>,
    buffer: Vec<f32>,
    pcm: Vec<i16>,
}

impl AudioEngine {
    pub fn new(context: Arc<EngineContext>, config: &EngineConfig) -> Self {
        let synth = Synthesizer::new(config);
        let frames = synth.frames();
        Self {
            context,
            synth,
            effects: EffectChain::new(config),
            held: Vec::new(),
            buffer: vec![0.0; frames],
            pcm: Vec::with_capacity(frames),
        }
    }

    pub fn context(&self) -> &Arc<EngineContext> {
        &self.context
    }

    /// Samples per cycle.
    pub fn frames(&self) -> usize {
        self.buffer.len()
    }

    /// Render one buffer of float samples from the current shared state.
    pub fn render_block(&mut self) -> &[f32] {
        self.context.notes.snapshot_into(&mut self.held);
        let controls = self.context.controls.read_all();

        self.synth
            .render_into(&mut self.held, controls.waveform, &mut self.buffer);
        self.context.notes.commit_phases(&self.held);

        self.effects.process(&mut self.buffer, &controls);
        &self.buffer
    }

    /// Render one buffer and convert it to 16-bit PCM.
    pub fn render_cycle(&mut self) -> &[i16] {
        self.render_block();
        to_pcm16(&self.buffer, &mut self.pcm);
        &self.pcm
    }

    /// Render and write until shutdown or a sink failure.
    pub fn run<S: AudioSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), EngineError> {
        info!(frames = self.frames(), "render loop started");
        let mut cycles: u64 = 0;

        while self.context.is_running() {
            self.render_cycle();
            if let Err(e) = sink.write(&self.pcm) {
                error!("audio output failed: {}", e);
                self.context.shutdown();
                return Err(e.into());
            }

            cycles += 1;
            if cycles % 1000 == 0 {
                debug!(cycles, held = self.held.len(), "render loop alive");
            }
        }

        info!(cycles, "render loop stopped");
        Ok(())
    }
}
