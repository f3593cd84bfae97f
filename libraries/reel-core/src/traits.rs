//! Boundary traits for Reel

use crate::error::Result;
use crate::types::Track;
use std::path::Path;
use std::time::Duration;

/// Audio output backend
///
/// One playback session is tied to one physical audio output at a time.
/// The playback sequencer owns a single handle, constructed once and
/// rebound via [`AudioOutput::load`] on every track change; loading a new
/// source implicitly cancels whatever was playing before.
///
/// Commands are fire-and-forget: their asynchronous completion is observed
/// later through telemetry reads and the end-of-track notification the
/// platform feeds back into the sequencer, never awaited synchronously.
pub trait AudioOutput: Send {
    /// Bind a new audio source, replacing whatever was loaded before
    ///
    /// # Errors
    /// Returns an error if the backend cannot resolve the source
    fn load(&mut self, source: &Path) -> Result<()>;

    /// Start or resume playback of the loaded source
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the loaded source and position
    fn pause(&mut self) -> Result<()>;

    /// Seek to a position in the loaded source
    ///
    /// Out-of-range positions are clamped by the backend; callers do not
    /// validate against the reported duration.
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set output volume in `[0.0, 1.0]`
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Current playback position (telemetry)
    fn position(&self) -> Duration;

    /// Duration of the loaded source (telemetry)
    fn duration(&self) -> Duration;
}

/// Ordered track collection source
///
/// Owned by the collection-management layer (file selection, metadata
/// extraction); consulted whenever the user's track collection changes.
/// Implementors hand the playback core a fully resolved, ordered list of
/// tracks and, optionally, the index the user considers current.
pub trait TrackProvider {
    /// The full ordered collection
    fn tracks(&self) -> Vec<Track>;

    /// Desired current index, if the provider tracks one
    fn current_index(&self) -> Option<usize> {
        None
    }
}
