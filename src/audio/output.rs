use super::SoundRequest;
use crate::api::Sound;
use crate::{Result, ZammError};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle};
use std::time::Duration;
use tracing::info;

/// Default audio device output for interface sounds
pub struct SoundOutput {
    // Playback stops when the stream is dropped
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl SoundOutput {
    /// Open the default output device
    pub fn new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| ZammError::AudioDeviceError(format!("No output device available: {}", e)))?;
        info!("Opened default sound output");
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    /// Play a request without waiting for it to finish
    pub fn play(&self, request: &SoundRequest) -> Result<()> {
        let (frequency, length) = tone(request.sound);
        let source = SineWave::new(frequency)
            .take_duration(length)
            .amplify(request.volume.max(0.0))
            .speed(request.speed.max(0.01));
        self.handle
            .play_raw(source.convert_samples())
            .map_err(|e| ZammError::AudioDeviceError(format!("Failed to play sound: {}", e)))
    }
}

fn tone(sound: Sound) -> (f32, Duration) {
    match sound {
        Sound::Switch => (880.0, Duration::from_millis(60)),
        Sound::Whoosh => (440.0, Duration::from_millis(200)),
    }
}
