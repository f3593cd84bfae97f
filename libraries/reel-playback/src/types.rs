//! Core types for playback sequencing

use reel_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop at the end of the sequence
    Off,

    /// Wrap back to the first track
    All,

    /// Loop the current track indefinitely
    One,
}

impl RepeatMode {
    /// Advance through the fixed cycle Off → All → One → Off
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Transport state
///
/// Derived from the cursor and play flag: Empty means no current track,
/// Ready means a current track is selected but paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No current track
    Empty,

    /// Current track selected, not playing
    Ready,

    /// Current track playing
    Playing,
}

/// Read-only projection of sequencer state for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// The track the sequencer considers current, if any
    pub current_track: Option<Track>,

    /// Numeric index of the current track
    ///
    /// Derived best-effort convenience value; track identity is
    /// authoritative across mutations.
    pub current_index: Option<usize>,

    /// Transport state
    pub state: PlayerState,

    /// Whether audio is playing
    pub is_playing: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Whether shuffled traversal is enabled
    pub shuffle: bool,

    /// Output volume in `[0.0, 1.0]`
    pub volume: f32,

    /// Playback position mirrored from the audio output
    pub position: Duration,

    /// Track duration mirrored from the audio output
    pub duration: Duration,

    /// Number of tracks in the sequence
    pub track_count: usize,
}

/// Configuration for the playback sequencer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume in `[0.0, 1.0]` (default: 1.0)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle state (default: off)
    pub shuffle: bool,

    /// previous() restarts the current track instead of moving back once
    /// playback has advanced past this threshold (default: 4 s)
    pub restart_threshold: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat: RepeatMode::Off,
            shuffle: false,
            restart_threshold: Duration::from_secs(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 1.0);
        assert_eq!(config.repeat, RepeatMode::Off);
        assert!(!config.shuffle);
        assert_eq!(config.restart_threshold, Duration::from_secs(4));
    }

    #[test]
    fn repeat_cycle_order() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
    }
}
