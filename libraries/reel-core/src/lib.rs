//! Reel Core
//!
//! Shared domain types, boundary traits, and error handling for Reel.
//!
//! The core crate defines:
//! - **Domain Types**: [`Track`] and [`TrackId`]
//! - **Boundary Traits**: [`AudioOutput`] (the single physical playback
//!   resource) and [`TrackProvider`] (the externally-owned track collection)
//! - **Error Handling**: unified [`CoreError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use reel_core::{Track, TrackId};
//! use std::path::PathBuf;
//!
//! let track = Track::new("My Favorite Song", PathBuf::from("/music/song.mp3"))
//!     .with_artist("Some Artist");
//!
//! assert_eq!(track.title, "My Favorite Song");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::{AudioOutput, TrackProvider};
pub use types::{Track, TrackId};
