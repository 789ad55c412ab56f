use std::fmt;

/// Failure of the MIDI event source feeding the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The event stream closed; no further events will arrive.
    Disconnected,
    /// The MIDI backend could not be opened or connected.
    Device(String),
}

/// Failure of the audio sink the engine writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// No output device is available.
    NoDevice,
    /// The output device refused the stream configuration.
    Open(String),
    /// The running stream reported an error.
    Stream(String),
    /// The sink no longer accepts audio.
    Closed,
}

/// Reason the render loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Sink(SinkError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Disconnected => write!(f, "MIDI input stream disconnected"),
            InputError::Device(msg) => write!(f, "MIDI input device error: {msg}"),
        }
    }
}

impl std::error::Error for InputError {}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::NoDevice => write!(f, "no audio output device available"),
            SinkError::Open(msg) => write!(f, "failed to open audio output: {msg}"),
            SinkError::Stream(msg) => write!(f, "audio stream error: {msg}"),
            SinkError::Closed => write!(f, "audio sink closed"),
        }
    }
}

impl std::error::Error for SinkError {}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Sink(e) => write!(f, "render loop stopped: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Sink(e) => Some(e),
        }
    }
}

impl From<SinkError> for EngineError {
    fn from(e: SinkError) -> Self {
        EngineError::Sink(e)
    }
}
