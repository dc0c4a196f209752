//! Audio-cue seam. The core never owns an audio backend; it asks a host
//! implementation for a discrete tone and carries on if that fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    /// Context not yet unlocked by a user gesture, or backend still starting.
    #[error("audio context not ready")]
    NotReady,
    #[error("audio backend failure: {0}")]
    Backend(String),
}

/// Best-effort, fire-and-forget tone playback.
pub trait AudioCue {
    fn play_tone(
        &mut self,
        frequency_hz: f32,
        velocity: f32,
        duration_sec: f32,
    ) -> Result<(), AudioError>;
}

/// Silent stand-in used when no audio backend is wired up (tests, headless).
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioCue for NullAudio {
    fn play_tone(&mut self, _: f32, _: f32, _: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}
