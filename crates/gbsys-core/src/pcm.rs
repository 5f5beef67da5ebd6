use crate::error::SysError;

/// Where the emulated APU's samples go. Mono, signed 16-bit.
pub trait PcmSink {
    fn sample_rate(&self) -> u32;

    /// Queues samples, returning how many were accepted. A sink that is
    /// already far enough ahead may take fewer than offered.
    fn submit(&mut self, samples: &[i16]) -> Result<usize, SysError>;

    fn pause(&mut self, paused: bool);

    fn close(&mut self);
}

/// Swallows everything; used when sound is off.
#[derive(Debug, Default)]
pub struct NullPcm {
    sample_rate: u32,
}

impl NullPcm {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl PcmSink for NullPcm {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn submit(&mut self, samples: &[i16]) -> Result<usize, SysError> {
        Ok(samples.len())
    }

    fn pause(&mut self, _paused: bool) {}

    fn close(&mut self) {}
}
