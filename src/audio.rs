// Drop feedback sound: an optional playback capability with mute handling.

/// Volume used when the sound is not muted.
pub const DEFAULT_VOLUME: f32 = 0.6;

/// Errors a playback backend can report. The controller logs and ignores them.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("playback device error: {0}")]
    Device(String),
}

/// A backend able to play the drop sound.
pub trait Playback {
    /// Start playing the sound from the beginning.
    fn play(&mut self) -> Result<(), PlaybackError>;
    /// Set output volume in [0.0, 1.0].
    fn set_volume(&mut self, volume: f32);
}

/// The drop sound as seen by the controller. Playback is best-effort.
pub struct DropSound {
    backend: Option<Box<dyn Playback>>,
    volume: f32,
    muted: bool,
}

impl DropSound {
    /// A drop sound with no backend; every call is a no-op.
    pub fn silent() -> Self {
        Self {
            backend: None,
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }

    /// Wrap a backend and push the initial volume to it.
    pub fn new(mut backend: Box<dyn Playback>, volume: f32, muted: bool) -> Self {
        backend.set_volume(if muted { 0.0 } else { volume });
        Self {
            backend: Some(backend),
            volume,
            muted,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Mute drops the backend volume to zero; unmute restores the configured volume.
    pub fn set_mute(&mut self, muted: bool) {
        self.muted = muted;
        let volume = if muted { 0.0 } else { self.volume };
        if let Some(backend) = self.backend.as_mut() {
            backend.set_volume(volume);
        }
    }

    /// Play once. Failures are logged and otherwise ignored.
    pub fn play(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play() {
            log::warn!("Drop sound playback failed: {e}");
        }
    }
}

impl Default for DropSound {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for DropSound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropSound")
            .field("has_backend", &self.backend.is_some())
            .field("volume", &self.volume)
            .field("muted", &self.muted)
            .finish()
    }
}
