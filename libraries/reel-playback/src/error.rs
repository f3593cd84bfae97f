//! Error types for playback sequencing

use reel_core::TrackId;
use thiserror::Error;

/// Playback errors
///
/// Invalid indices and empty-sequence commands degrade to safe no-ops and
/// never surface here; the only operation expected to communicate failure
/// back to its caller is removing the last remaining track.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Removing this track would leave the sequence empty
    #[error("Cannot remove last track: {0}")]
    CannotRemoveLastTrack(TrackId),

    /// Audio output backend failure
    #[error(transparent)]
    Core(#[from] reel_core::CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
