//! Domain types for Reel

mod ids;
mod track;

pub use ids::TrackId;
pub use track::Track;
