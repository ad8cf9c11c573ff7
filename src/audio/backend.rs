//! Audio engine abstraction.
//!
//! The playback coordinator talks to the host's audio capability through this
//! trait. A backend failure never surfaces to the user: the coordinator falls
//! back to a simulated session and the companion keeps running. Hosts without
//! any audio capability use [`SilentBackend`], which refuses every start so
//! all sessions are simulated.

use thiserror::Error;

/// A resource could not be started.
///
/// Consumed internally by the coordinator's simulated-mode fallback; it never
/// propagates out of the audio layer.
#[derive(Debug, Error)]
#[error("failed to start '{path}': {reason}")]
pub struct BackendStartError {
    /// Resource path whose start failed.
    pub path: String,
    /// Engine-specific description.
    pub reason: String,
}

/// Host audio capability used for real (non-simulated) sessions.
///
/// A backend plays at most one looped resource at a time; `start` on a busy
/// backend replaces the current resource.
pub trait AudioBackend {
    /// Starts `path` looped at `volume`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendStartError`] when the resource cannot be loaded or
    /// started; the coordinator then degrades to simulated playback.
    fn start(&mut self, path: &str, volume: f32) -> Result<(), BackendStartError>;

    /// Stops and releases the current resource, if any.
    fn stop(&mut self);

    /// Pauses the current resource.
    fn pause(&mut self);

    /// Resumes a paused resource.
    fn resume(&mut self);

    /// Applies a new volume to the current resource.
    fn set_volume(&mut self, volume: f32);
}

/// Backend for hosts without audio output.
///
/// Every start fails, so all sessions run in simulated mode. The default
/// backend for the terminal shim.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn start(&mut self, path: &str, _volume: f32) -> Result<(), BackendStartError> {
        Err(BackendStartError {
            path: path.to_string(),
            reason: "no audio output available".to_string(),
        })
    }

    fn stop(&mut self) {}

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn set_volume(&mut self, _volume: f32) {}
}
