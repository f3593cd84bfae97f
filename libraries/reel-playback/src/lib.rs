//! Reel - Playback Sequencing
//!
//! Platform-agnostic playback sequencing for Reel.
//!
//! This crate provides:
//! - Ordered track sequence (doubly-linked, identity-based cursor)
//! - Transport state machine (Empty, Ready, Playing)
//! - Repeat modes (Off, All, One)
//! - Shuffled traversal over the sequence
//! - Whole-collection rebuilds with current-track resolution
//! - Event queue for presentation-layer synchronization
//!
//! # Architecture
//!
//! `reel-playback` never touches an audio device directly; the physical
//! backend is supplied as a [`reel_core::AudioOutput`] trait object and the
//! sequencer owns that single handle for its whole lifetime, rebinding it
//! on every track change.
//!
//! # Example: Basic Sequencing
//!
//! ```rust
//! use reel_playback::{PlaybackConfig, PlaybackSequencer};
//! use reel_core::{AudioOutput, Track};
//! use std::path::{Path, PathBuf};
//! use std::time::Duration;
//!
//! // Silent backend for environments without an audio device
//! struct NullOutput;
//!
//! impl AudioOutput for NullOutput {
//!     fn load(&mut self, _source: &Path) -> reel_core::Result<()> { Ok(()) }
//!     fn play(&mut self) -> reel_core::Result<()> { Ok(()) }
//!     fn pause(&mut self) -> reel_core::Result<()> { Ok(()) }
//!     fn seek(&mut self, _position: Duration) -> reel_core::Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _volume: f32) -> reel_core::Result<()> { Ok(()) }
//!     fn position(&self) -> Duration { Duration::ZERO }
//!     fn duration(&self) -> Duration { Duration::ZERO }
//! }
//!
//! let mut sequencer = PlaybackSequencer::new(Box::new(NullOutput), PlaybackConfig::default());
//!
//! let tracks = vec![
//!     Track::new("First", PathBuf::from("/music/first.mp3")),
//!     Track::new("Second", PathBuf::from("/music/second.mp3")),
//! ];
//! sequencer.rebuild(tracks, None);
//!
//! sequencer.toggle_play_pause().unwrap();
//! sequencer.next().unwrap();
//! assert_eq!(sequencer.current_index(), Some(1));
//!
//! for event in sequencer.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

mod error;
mod events;
pub mod sequence;
mod sequencer;
mod shuffle;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use sequence::{Node, NodeRef, Sequence};
pub use sequencer::PlaybackSequencer;
pub use types::{PlaybackConfig, PlaybackSnapshot, PlayerState, RepeatMode};
