//! Live runtime: a MIDI keyboard in, the default sound card out.
//!
//! This module provides the `KeysRuntime` builder, which wires a MIDI input
//! port to the router and the render loop to a cpal output, each on its own
//! thread.
//!
//! # Example
//!
//! ```ignore
//! use saavy_keys::{config::EngineConfig, io::PortSelector, runtime::KeysRuntime};
//!
//! fn main() -> color_eyre::Result<()> {
//!     KeysRuntime::new(EngineConfig::default())
//!         .midi_port(PortSelector::Name("Launchkey".into()))
//!         .run()
//! }
//! ```

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::engine::AudioEngine;
use crate::io::cpal_sink::CpalSink;
use crate::io::midi_device::{MidiInputDevice, PortSelector};
use crate::synth::context::EngineContext;
use crate::synth::router::MidiRouter;

/// Builder for a live keyboard session.
pub struct KeysRuntime {
    config: EngineConfig,
    port: PortSelector,
}

impl KeysRuntime {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            port: PortSelector::default(),
        }
    }

    /// Choose the MIDI input port
    pub fn midi_port(mut self, port: PortSelector) -> Self {
        self.port = port;
        self
    }

    /// Play until the audio output fails. Blocks the calling thread.
    ///
    /// Losing the MIDI input only stops the router; held notes and the
    /// last control values keep sounding.
    pub fn run(self) -> EyreResult<()> {
        if self.config.frames_per_buffer() == 0 {
            return Err(eyre!(
                "buffer of {} s at {} Hz holds no samples",
                self.config.buffer_duration,
                self.config.sample_rate
            ));
        }
        let context = Arc::new(EngineContext::new());

        let (device, mut events) = MidiInputDevice::connect(&self.port)
            .wrap_err_with(|| format!("failed to open MIDI input {}", self.port))?;
        info!(
            port = device.name(),
            sample_rate = self.config.sample_rate,
            frames = self.config.frames_per_buffer(),
            "saavy-keys running"
        );

        let router = MidiRouter::new(context.clone()).with_channel(self.config.midi_channel);
        let router_thread = thread::Builder::new()
            .name("midi-router".into())
            .spawn(move || router.run(&mut events))
            .wrap_err("failed to spawn MIDI router thread")?;

        let engine_context = context.clone();
        let config = self.config.clone();
        let engine_thread = thread::Builder::new()
            .name("audio-engine".into())
            .spawn(move || -> EyreResult<()> {
                let mut sink = match CpalSink::open(&config) {
                    Ok(sink) => sink,
                    Err(e) => {
                        engine_context.shutdown();
                        return Err(e).wrap_err("failed to open audio output");
                    }
                };
                let mut engine = AudioEngine::new(engine_context, &config);
                engine.run(&mut sink)?;
                Ok(())
            })
            .wrap_err("failed to spawn audio engine thread")?;

        let engine_result = engine_thread
            .join()
            .map_err(|_| eyre!("audio engine thread panicked"));

        // Closing the port disconnects the router's receiver
        context.shutdown();
        drop(device);

        match router_thread.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("MIDI router ended with an error: {}", e),
            Err(_) => warn!("MIDI router thread panicked"),
        }

        engine_result?
    }
}
