use gbsys_core::pcm::PcmSink;
use gbsys_core::SysError;
use sdl2::audio::{AudioQueue, AudioSpecDesired};

const MAX_QUEUE_MS: u32 = 120;

pub struct SdlPcm {
    queue: AudioQueue<i16>,
    sample_rate_hz: u32,
    channels: u8,
}

impl SdlPcm {
    pub fn new(audio: &sdl2::AudioSubsystem, sample_rate_hz: u32) -> Result<Self, SysError> {
        let freq = i32::try_from(sample_rate_hz)
            .map_err(|_| SysError::Audio(format!("invalid sample rate: {sample_rate_hz}")))?;
        let desired = AudioSpecDesired {
            freq: Some(freq),
            channels: Some(1),
            samples: None,
        };

        let queue = audio
            .open_queue::<i16, _>(None, &desired)
            .map_err(SysError::Audio)?;
        let spec = queue.spec();
        let sample_rate_hz = u32::try_from(spec.freq).unwrap_or(sample_rate_hz);
        let channels = spec.channels;
        queue.resume();

        Ok(Self {
            queue,
            sample_rate_hz,
            channels,
        })
    }

    fn queued_samples(&self) -> usize {
        self.queue.size() as usize / std::mem::size_of::<i16>()
    }
}

/// Samples that fit in `max_queue_ms` of audio.
pub fn queue_capacity(sample_rate_hz: u32, channels: u8, max_queue_ms: u32) -> usize {
    (sample_rate_hz as u64 * channels as u64 * max_queue_ms as u64 / 1000) as usize
}

impl PcmSink for SdlPcm {
    fn sample_rate(&self) -> u32 {
        self.sample_rate_hz
    }

    fn submit(&mut self, samples: &[i16]) -> Result<usize, SysError> {
        if samples.is_empty() {
            return Ok(0);
        }

        let max = queue_capacity(self.sample_rate_hz, self.channels, MAX_QUEUE_MS);
        let queued = self.queued_samples();
        if queued >= max {
            return Ok(0);
        }

        let take = samples.len().min(max - queued);
        self.queue
            .queue_audio(&samples[..take])
            .map_err(SysError::Audio)?;
        Ok(take)
    }

    fn pause(&mut self, paused: bool) {
        if paused {
            self.queue.pause();
        } else {
            self.queue.resume();
        }
    }

    fn close(&mut self) {
        self.queue.pause();
        self.queue.clear();
    }
}
