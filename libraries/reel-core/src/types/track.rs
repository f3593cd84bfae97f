//! Track domain type

use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Audio track
///
/// Immutable value supplied wholesale by a [`crate::traits::TrackProvider`].
/// The playback core never mutates a track, only its position in the
/// sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Resolvable audio resource locator
    pub source: PathBuf,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Cover art locator
    pub cover: Option<PathBuf>,
}

impl Track {
    /// Create a new track with a generated id and minimal metadata
    pub fn new(title: impl Into<String>, source: PathBuf) -> Self {
        Self {
            id: TrackId::generate(),
            source,
            title: title.into(),
            artist: String::new(),
            cover: None,
        }
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the cover art locator
    #[must_use]
    pub fn with_cover(mut self, cover: PathBuf) -> Self {
        self.cover = Some(cover);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_creation() {
        let track = Track::new("Test Song", PathBuf::from("/music/song.mp3"))
            .with_artist("Test Artist")
            .with_cover(PathBuf::from("/covers/song.jpg"));

        assert_eq!(track.title, "Test Song");
        assert_eq!(track.artist, "Test Artist");
        assert_eq!(track.source, PathBuf::from("/music/song.mp3"));
        assert_eq!(track.cover, Some(PathBuf::from("/covers/song.jpg")));
    }

    #[test]
    fn serde_round_trip() {
        let track = Track::new("Test Song", PathBuf::from("/music/song.mp3"));
        let json = serde_json::to_string(&track).unwrap();
        let back: Track = serde_json::from_str(&json).unwrap();
        assert_eq!(back, track);
    }
}
