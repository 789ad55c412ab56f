use std::io::Write;
use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};
use std::thread;

use saavy_keys::dsp::Waveform;
use saavy_keys::error::InputError;
use saavy_keys::io::MidiEvent;
use saavy_keys::synth::{ControlChannel, IgnoreReason, Route};
use saavy_keys::{EngineContext, MidiRouter};

fn parse(bytes: &[u8]) -> MidiEvent {
    MidiEvent::from_bytes(bytes).expect("valid message")
}

#[test]
fn cc14_at_64_sets_vibrato_to_half_scale() {
    let context = Arc::new(EngineContext::new());
    let router = MidiRouter::new(context.clone());
    router.route(parse(&[0xB0, 14, 64]));
    let vibrato = context.controls.get(ControlChannel::Vibrato);
    assert!((vibrato - 64.0 / 127.0).abs() < 1e-6);
}

#[test]
fn sustain_pedal_toggles_waveform() {
    let context = Arc::new(EngineContext::new());
    let router = MidiRouter::new(context.clone());

    router.route(parse(&[0xB0, 64, 127]));
    assert_eq!(context.controls.get(ControlChannel::Waveform), 1.0);
    assert_eq!(context.controls.waveform(), Waveform::Sawtooth);

    for value in [0, 1, 64, 126] {
        router.route(parse(&[0xB0, 64, 127]));
        router.route(parse(&[0xB0, 64, value]));
        assert_eq!(context.controls.get(ControlChannel::Waveform), 0.0);
    }
}

#[test]
fn controllers_outside_the_map_are_no_ops() {
    let context = Arc::new(EngineContext::new());
    let router = MidiRouter::new(context.clone());
    let before = context.controls.read_all();

    for controller in (0..14).chain(19..64).chain(65..128) {
        let route = router.route(parse(&[0xB0, controller, 100]));
        assert_eq!(route, Route::Ignored(IgnoreReason::UnmappedControl));
    }
    assert_eq!(context.controls.read_all(), before);
}

#[test]
fn keys_outside_the_table_are_dropped() {
    let context = Arc::new(EngineContext::new());
    let router = MidiRouter::new(context.clone());
    for key in (0..21).chain(97..128) {
        router.route(parse(&[0x90, key, 100]));
    }
    assert!(context.notes.is_empty());
}

#[test]
fn repeated_note_on_keeps_one_entry() {
    let context = Arc::new(EngineContext::new());
    let router = MidiRouter::new(context.clone());
    router.route(parse(&[0x90, 69, 100]));
    router.route(parse(&[0x90, 69, 20]));
    assert_eq!(context.notes.frequencies(), vec![440.0]);
}

#[test]
fn pitch_wheel_extremes() {
    let context = Arc::new(EngineContext::new());
    let router = MidiRouter::new(context.clone());

    router.route(parse(&[0xE0, 0x00, 0x00]));
    assert_eq!(context.controls.pitch_bend(), -1.0);
    router.route(parse(&[0xE0, 0x7F, 0x7F]));
    assert!((context.controls.pitch_bend() - 8191.0 / 8192.0).abs() < 1e-6);
    router.route(parse(&[0xE0, 0x00, 0x40]));
    assert_eq!(context.controls.pitch_bend(), 0.0);
    // The knob is untouched by the wheel
    assert_eq!(context.controls.get(ControlChannel::PitchShift), 0.0);
}

#[test]
fn router_thread_ends_when_input_closes() {
    let context = Arc::new(EngineContext::new());
    let router = MidiRouter::new(context.clone());
    let (tx, mut rx) = channel();

    let handle = thread::spawn(move || router.run(&mut rx));
    tx.send(parse(&[0x90, 60, 100])).unwrap();
    tx.send(parse(&[0x90, 64, 100])).unwrap();
    tx.send(parse(&[0x80, 60, 0])).unwrap();
    drop(tx);

    let result = handle.join().unwrap();
    assert_eq!(result, Err(InputError::Disconnected));
    assert_eq!(context.notes.frequencies(), vec![329.63]);
    assert!(context.is_running());
}

/// Collects formatted log lines for inspection.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn routed_events_log_resulting_state() {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let context = Arc::new(EngineContext::new());
    let router = MidiRouter::new(context.clone());
    let (tx, mut rx) = channel();
    tx.send(parse(&[0x90, 60, 100])).unwrap();
    tx.send(parse(&[0xB0, 15, 127])).unwrap();
    drop(tx);

    tracing::subscriber::with_default(subscriber, || {
        let _ = router.run(&mut rx);
    });

    let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("notes=[261.63]"), "{}", output);
    assert!(output.contains("distortion: 1.0"), "{}", output);
}
