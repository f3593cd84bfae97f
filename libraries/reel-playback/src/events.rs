//! Playback events
//!
//! Queued by the sequencer during state transitions and drained by the
//! presentation layer. Every externally observable change produces an
//! event, including the rejection of a last-track removal, which must
//! reach the user as an explicit refusal rather than a silent no-op.

use crate::types::{PlayerState, RepeatMode};
use reel_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: PlayerState,
    },

    /// Current track changed
    TrackChanged {
        /// Id of the new current track
        track_id: TrackId,
        /// Id of the previous current track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// The new repeat mode
        mode: RepeatMode,
    },

    /// Shuffled traversal toggled
    ShuffleChanged {
        /// Whether shuffle is now enabled
        enabled: bool,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume in `[0.0, 1.0]`
        volume: f32,
    },

    /// Sequence rebuilt or mutated (tracks added/removed/moved)
    SequenceChanged {
        /// New number of tracks
        track_count: usize,
    },

    /// A track finished playing naturally (reached end)
    TrackFinished {
        /// Id of the finished track
        track_id: TrackId,
    },

    /// A removal was rejected because it would empty the sequence
    RemovalRejected {
        /// Id of the track whose removal was rejected
        track_id: TrackId,
        /// Human-readable reason for the presentation layer
        reason: String,
    },
}
