//! saavy-keys - play a MIDI keyboard through the default sound card
//!
//! Run with: cargo run -- --midi-port 1

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use tracing::Level;

use saavy_keys::io::{list_ports, PortSelector};
use saavy_keys::runtime::KeysRuntime;
use saavy_keys::{EngineConfig, Normalization};

#[derive(Parser)]
#[command(name = "saavy-keys")]
#[command(about = "Realtime polyphonic MIDI keyboard synthesizer", long_about = None)]
struct Cli {
    /// MIDI input port, by index or by part of its name
    #[arg(short = 'p', long, default_value = "1")]
    midi_port: PortSelector,

    /// List MIDI input ports and exit
    #[arg(short, long)]
    list_ports: bool,

    /// Output sample rate in Hz
    #[arg(short, long, default_value_t = saavy_keys::SAMPLE_RATE, value_parser = positive_f32)]
    sample_rate: f32,

    /// Length of one rendered buffer in seconds
    #[arg(short, long, default_value_t = saavy_keys::BUFFER_DURATION, value_parser = positive_f32)]
    buffer_duration: f32,

    /// Requested device period in frames (driver default if omitted)
    #[arg(long)]
    device_buffer: Option<u32>,

    /// Only listen to this MIDI channel (0-15)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..16))]
    channel: Option<u8>,

    /// How chords are kept in range
    #[arg(long, value_enum, default_value_t = NormalizeArg::Final)]
    normalize: NormalizeArg,

    /// Log every routed MIDI event
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum NormalizeArg {
    /// Scale the finished mix once
    Final,
    /// Scale after every note (older notes end up quieter)
    PerNote,
}

impl From<NormalizeArg> for Normalization {
    fn from(arg: NormalizeArg) -> Self {
        match arg {
            NormalizeArg::Final => Normalization::Final,
            NormalizeArg::PerNote => Normalization::PerNote,
        }
    }
}

fn positive_f32(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be greater than zero"))
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    if cli.list_ports {
        let ports = list_ports().wrap_err("failed to query MIDI inputs")?;
        if ports.is_empty() {
            println!("No MIDI input ports found");
        }
        for (index, name) in ports.iter().enumerate() {
            println!("{index}: {name}");
        }
        return Ok(());
    }

    let config = EngineConfig {
        sample_rate: cli.sample_rate,
        buffer_duration: cli.buffer_duration,
        normalization: cli.normalize.into(),
        device_buffer_frames: cli.device_buffer,
        midi_channel: cli.channel,
        ..EngineConfig::default()
    };

    KeysRuntime::new(config).midi_port(cli.midi_port).run()
}
