use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::SinkError;
use crate::io::sink::AudioSink;

/*
Blocking Writes Over a Callback Device
======================================

cpal pulls audio from a callback on its own thread, while the render loop
wants to push fixed-size chunks and block. An rtrb SPSC ring sits between
them:

    engine thread                      device thread
    write(chunk) --push--> [ ring ] --pop--> callback(data)
          ^                   |
          +-- waits while ----+
              the ring is full

The ring holds two chunks. While it is full, `write` waits for the callback
to drain it, which paces the engine to the device clock. When the ring runs
dry the callback plays silence rather than blocking the device thread.

Mono samples are copied to every output channel.
*/

const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Default output device driven through a lock-free ring.
pub struct CpalSink {
    producer: Producer<i16>,
    errors: Receiver<String>,
    _stream: cpal::Stream,
}

impl CpalSink {
    /// Open the default output device at the configured sample rate.
    ///
    /// The stream must stay on the thread that opened it on some hosts, so
    /// open the sink on the thread that will write to it.
    pub fn open(config: &EngineConfig) -> Result<Self, SinkError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(SinkError::NoDevice)?;
        let supported = device
            .default_output_config()
            .map_err(|e| SinkError::Open(e.to_string()))?;

        let stream_config = cpal::StreamConfig {
            channels: supported.channels(),
            sample_rate: cpal::SampleRate(config.sample_rate as u32),
            buffer_size: match config.device_buffer_frames {
                Some(frames) => cpal::BufferSize::Fixed(frames),
                None => cpal::BufferSize::Default,
            },
        };
        info!(
            device = %device.name().unwrap_or_else(|_| "unknown".into()),
            channels = stream_config.channels,
            sample_rate = stream_config.sample_rate.0,
            format = ?supported.sample_format(),
            "opening audio output"
        );

        let (producer, consumer) = RingBuffer::<i16>::new(config.frames_per_buffer().max(1) * 2);
        let (error_tx, errors) = mpsc::channel();

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, consumer, error_tx),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, consumer, error_tx),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, consumer, error_tx),
            other => return Err(SinkError::Open(format!("unsupported sample format {other:?}"))),
        }?;
        stream.play().map_err(|e| SinkError::Open(e.to_string()))?;

        Ok(Self {
            producer,
            errors,
            _stream: stream,
        })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut consumer: Consumer<i16>,
    errors: Sender<String>,
) -> Result<cpal::Stream, SinkError>
where
    T: SizedSample + FromSample<i16>,
{
    let channels = config.channels as usize;
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let value = match consumer.pop() {
                        Ok(sample) => T::from_sample(sample),
                        Err(_) => T::EQUILIBRIUM,
                    };
                    frame.fill(value);
                }
            },
            move |err| match err {
                cpal::StreamError::DeviceNotAvailable => {
                    let _ = errors.send(err.to_string());
                }
                other => warn!("audio stream: {}", other),
            },
            None,
        )
        .map_err(|e| SinkError::Open(e.to_string()))
}

impl AudioSink for CpalSink {
    fn write(&mut self, samples: &[i16]) -> Result<(), SinkError> {
        let mut remaining = samples;
        while !remaining.is_empty() {
            if let Ok(message) = self.errors.try_recv() {
                return Err(SinkError::Stream(message));
            }
            if self.producer.is_abandoned() {
                return Err(SinkError::Closed);
            }

            let n = self.producer.slots().min(remaining.len());
            if n == 0 {
                thread::sleep(POLL_INTERVAL);
                continue;
            }
            let chunk = self
                .producer
                .write_chunk_uninit(n)
                .map_err(|_| SinkError::Closed)?;
            let written = chunk.fill_from_iter(remaining[..n].iter().copied());
            remaining = &remaining[written..];
        }
        Ok(())
    }
}

impl Drop for CpalSink {
    fn drop(&mut self) {
        info!("closing audio output");
    }
}
