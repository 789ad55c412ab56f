use crate::error::SinkError;

/// Destination for rendered PCM chunks.
///
/// `write` blocks until the whole chunk has been accepted. The render loop
/// has no timer of its own; this blocking is what paces it to real time.
pub trait AudioSink {
    fn write(&mut self, samples: &[i16]) -> Result<(), SinkError>;
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn write(&mut self, samples: &[i16]) -> Result<(), SinkError> {
        (**self).write(samples)
    }
}

/// Sink that keeps every chunk in memory. Used for offline rendering and
/// tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    chunks: Vec<Vec<i16>>,
    limit: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `chunks` writes, then fail every later write with
    /// [`SinkError::Closed`].
    pub fn with_limit(chunks: usize) -> Self {
        Self {
            chunks: Vec::with_capacity(chunks),
            limit: Some(chunks),
        }
    }

    pub fn chunks(&self) -> &[Vec<i16>] {
        &self.chunks
    }

    /// Every captured sample, in write order.
    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.chunks.iter().flatten().copied()
    }

    pub fn into_chunks(self) -> Vec<Vec<i16>> {
        self.chunks
    }
}

impl AudioSink for MemorySink {
    fn write(&mut self, samples: &[i16]) -> Result<(), SinkError> {
        if self.limit.is_some_and(|limit| self.chunks.len() >= limit) {
            return Err(SinkError::Closed);
        }
        self.chunks.push(samples.to_vec());
        Ok(())
    }
}
