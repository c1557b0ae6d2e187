//! Interface sound playback
//!
//! Sounds are played on a dedicated thread fed through a channel so the UI
//! thread never blocks on the audio device.

#[cfg(feature = "audio-io")]
pub mod output;

use crate::api::Sound;
use crate::{Result, ZammError};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// A request to play one sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundRequest {
    pub sound: Sound,
    pub volume: f32,
    pub speed: f32,
}

/// Sending half of the sound player's queue
pub type SoundSender = Sender<SoundRequest>;

/// Queue a sound on the player
pub fn queue_sound(sender: &SoundSender, request: SoundRequest) -> Result<()> {
    sender
        .send(request)
        .map_err(|e| ZammError::ChannelError(format!("Sound player is gone: {}", e)))
}

/// Spawn the sound player thread
pub fn spawn_sound_player() -> Result<(SoundSender, JoinHandle<()>)> {
    let (tx, rx) = unbounded();
    let handle = std::thread::Builder::new()
        .name("zamm-sound".to_string())
        .spawn(move || run_player(rx))?;
    info!("Sound player started");
    Ok((tx, handle))
}

#[cfg(feature = "audio-io")]
fn run_player(rx: Receiver<SoundRequest>) {
    let output = match output::SoundOutput::new() {
        Ok(output) => Some(output),
        Err(e) => {
            warn!("Sound output unavailable, sounds will be skipped: {}", e);
            None
        }
    };

    while let Ok(request) = rx.recv() {
        match &output {
            Some(output) => {
                if let Err(e) = output.play(&request) {
                    warn!("Failed to play {:?}: {}", request.sound, e);
                }
            }
            None => debug!("Skipping {:?}", request.sound),
        }
    }
    info!("Sound player stopped");
}

#[cfg(not(feature = "audio-io"))]
fn run_player(rx: Receiver<SoundRequest>) {
    warn!("Built without audio-io, sounds will only be logged");
    while let Ok(request) = rx.recv() {
        debug!(
            "Playing {:?} at volume {} and speed {}",
            request.sound, request.volume, request.speed
        );
    }
    info!("Sound player stopped");
}
