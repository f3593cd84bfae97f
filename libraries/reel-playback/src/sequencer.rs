//! Playback sequencer - transport state machine
//!
//! Owns the track sequence, the current-track cursor, and the single audio
//! output handle. External events (user transport commands, telemetry
//! ticks, the end-of-track notification, collection rebuilds) map to state
//! transitions; each event is processed to completion before the next, and
//! moving to a new current track implicitly cancels the previous one by
//! rebinding the output via `load`.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    sequence::{Node, NodeRef, Sequence},
    shuffle::ShuffleOrder,
    types::{PlaybackConfig, PlaybackSnapshot, PlayerState, RepeatMode},
};
use reel_core::{AudioOutput, Track, TrackId, TrackProvider};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

type TrackNode = NodeRef<Track>;

/// Playback sequencer
///
/// Three transport states: Empty (no current node), Ready (current node,
/// paused), Playing. The sequence and playback state are owned exclusively
/// here; collaborators read snapshots or submit whole-collection rebuilds,
/// never touch nodes directly.
pub struct PlaybackSequencer {
    sequence: Sequence<Track>,

    /// Observing cursor into the sequence; absent means Empty
    current: Weak<RefCell<Node<Track>>>,

    is_playing: bool,
    repeat: RepeatMode,

    /// Present while shuffled traversal is enabled
    shuffle: Option<ShuffleOrder>,

    volume: f32,

    /// Position/duration mirrored from output telemetry
    position: Duration,
    duration: Duration,

    restart_threshold: Duration,

    /// The single physical output handle, rebound via `load` on track change
    output: Box<dyn AudioOutput>,

    /// Event queue for presentation-layer synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSequencer {
    /// Create a sequencer bound to its audio output handle
    ///
    /// The output is owned for the lifetime of the sequencer; it is never
    /// recreated, only rebound to new sources.
    pub fn new(output: Box<dyn AudioOutput>, config: PlaybackConfig) -> Self {
        let mut sequencer = Self {
            sequence: Sequence::new(),
            current: Weak::new(),
            is_playing: false,
            repeat: config.repeat,
            shuffle: None,
            volume: config.volume.clamp(0.0, 1.0),
            position: Duration::ZERO,
            duration: Duration::ZERO,
            restart_threshold: config.restart_threshold,
            output,
            pending_events: Vec::new(),
        };
        if config.shuffle {
            sequencer.shuffle = Some(ShuffleOrder::derive(Vec::new()));
        }
        sequencer
    }

    // ===== Transport Commands =====

    /// Toggle between Ready and Playing
    ///
    /// No-op while the sequence is empty.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.current.upgrade().is_none() {
            return Ok(());
        }
        if self.is_playing {
            self.output.pause()?;
            self.is_playing = false;
            self.emit_state_changed(PlayerState::Ready);
        } else {
            self.output.play()?;
            self.is_playing = true;
            self.emit_state_changed(PlayerState::Playing);
        }
        Ok(())
    }

    /// Advance to the successor track
    ///
    /// Follows chain order, or the shuffled order when shuffle is enabled.
    /// Wraps to the first track under `RepeatMode::All`; otherwise stays on
    /// the last track without stopping playback.
    pub fn next(&mut self) -> Result<()> {
        let Some(current) = self.current.upgrade() else {
            return Ok(());
        };
        if let Some(successor) = self.successor_of(&current) {
            self.move_current(successor)?;
        } else if self.repeat == RepeatMode::All {
            if let Some(first) = self.first_in_order() {
                self.move_current(first)?;
            }
        }
        Ok(())
    }

    /// Move to the predecessor track or restart the current one
    ///
    /// Reads the live position from the audio output. Under the restart
    /// threshold the cursor moves back, wrapping to the last track under
    /// `RepeatMode::All`; past the threshold the current track restarts
    /// from zero regardless of neighbors.
    pub fn previous(&mut self) -> Result<()> {
        let Some(current) = self.current.upgrade() else {
            return Ok(());
        };
        if self.output.position() >= self.restart_threshold {
            return self.restart_current();
        }
        if let Some(predecessor) = self.predecessor_of(&current) {
            self.move_current(predecessor)?;
        } else if self.repeat == RepeatMode::All {
            if let Some(last) = self.last_in_order() {
                self.move_current(last)?;
            }
        } else {
            self.restart_current()?;
        }
        Ok(())
    }

    /// Anchor playback on the track at `index` and start playing
    ///
    /// No-op when the index is out of range.
    pub fn play_at(&mut self, index: usize) -> Result<()> {
        let Some(node) = self.sequence.get_at(index) else {
            return Ok(());
        };
        self.move_current(node)?;
        if !self.is_playing {
            self.is_playing = true;
            self.output.play()?;
            self.emit_state_changed(PlayerState::Playing);
        }
        Ok(())
    }

    /// Advance the repeat mode through Off → All → One → Off
    pub fn cycle_repeat(&mut self) {
        self.repeat = self.repeat.cycle();
        self.pending_events
            .push(PlaybackEvent::RepeatChanged { mode: self.repeat });
        tracing::debug!(mode = ?self.repeat, "repeat mode cycled");
    }

    /// Toggle shuffled traversal
    ///
    /// Enabling derives a fresh permutation over the current sequence;
    /// disabling falls back to chain order.
    pub fn toggle_shuffle(&mut self) {
        if self.shuffle.is_some() {
            self.shuffle = None;
        } else {
            self.shuffle = Some(ShuffleOrder::derive(self.track_ids()));
        }
        let enabled = self.shuffle.is_some();
        self.pending_events
            .push(PlaybackEvent::ShuffleChanged { enabled });
        tracing::debug!(enabled, "shuffle toggled");
    }

    /// Set output volume, clamped into `[0.0, 1.0]`
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = volume.clamp(0.0, 1.0);
        self.output.set_volume(self.volume)?;
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.volume,
        });
        Ok(())
    }

    /// Seek within the current track
    ///
    /// The position is stored and forwarded as-is; bounds clamping against
    /// the duration is the output backend's responsibility.
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        self.position = position;
        self.output.seek(position)?;
        Ok(())
    }

    // ===== Incoming Events =====

    /// Mirror position/duration telemetry from the audio output
    ///
    /// Passive update only; never triggers a transition.
    pub fn on_telemetry_tick(&mut self, position: Duration, duration: Duration) {
        self.position = position;
        self.duration = duration;
    }

    /// Handle natural end of the current track
    ///
    /// Repeat One restarts the same track; otherwise the successor plays,
    /// wrapping under Repeat All. At the true end of the sequence the
    /// transport drops to Ready, remaining on the last track.
    pub fn on_track_ended(&mut self) -> Result<()> {
        let Some(current) = self.current.upgrade() else {
            return Ok(());
        };
        let finished_id = current.borrow().value().id.clone();
        self.pending_events.push(PlaybackEvent::TrackFinished {
            track_id: finished_id,
        });

        if self.repeat == RepeatMode::One {
            self.position = Duration::ZERO;
            self.output.seek(Duration::ZERO)?;
            self.output.play()?;
            return Ok(());
        }
        if let Some(successor) = self.successor_of(&current) {
            return self.move_current(successor);
        }
        if self.repeat == RepeatMode::All {
            if let Some(first) = self.first_in_order() {
                return self.move_current(first);
            }
        }

        self.is_playing = false;
        self.emit_state_changed(PlayerState::Ready);
        Ok(())
    }

    // ===== Sequence Mutation =====

    /// Rebuild the sequence wholesale from a new collection
    ///
    /// The old chain is discarded and a fresh one built. The current node
    /// resolves via `external_index` when it is in bounds, falling back to
    /// the head (reporting index 0), or to Empty when the collection is
    /// empty. Returns the resolved index so the external index owner can
    /// update itself. Playback state persists except where resolution
    /// forces it to change; an unchanged current id avoids a redundant
    /// reload.
    pub fn rebuild(&mut self, tracks: Vec<Track>, external_index: Option<usize>) -> Option<usize> {
        let state_before = self.state();
        let previous_id = self.current_track().map(|track| track.id);

        self.sequence = tracks.into_iter().collect();
        if self.shuffle.is_some() {
            self.shuffle = Some(ShuffleOrder::derive(self.track_ids()));
        }
        self.pending_events.push(PlaybackEvent::SequenceChanged {
            track_count: self.sequence.len(),
        });

        let resolved = if self.sequence.is_empty() {
            self.clear_current();
            None
        } else {
            let index = external_index
                .filter(|&index| index < self.sequence.len())
                .unwrap_or(0);
            if let Some(node) = self.sequence.get_at(index) {
                let same = previous_id.as_ref() == Some(&node.borrow().value().id);
                if same {
                    self.current = Rc::downgrade(&node);
                } else if let Err(error) = self.move_current(node) {
                    tracing::warn!(%error, "audio output rejected rebuilt current track");
                }
            }
            Some(index)
        };

        let state_after = self.state();
        if state_after != state_before {
            self.emit_state_changed(state_after);
        }
        resolved
    }

    /// Rebuild from a track provider
    pub fn rebuild_from(&mut self, provider: &dyn TrackProvider) -> Option<usize> {
        self.rebuild(provider.tracks(), provider.current_index())
    }

    /// Append a track to the end of the sequence
    ///
    /// The first track appended to an empty sequence becomes current and
    /// the transport moves from Empty to Ready.
    pub fn append_track(&mut self, track: Track) -> Result<()> {
        self.insert_track(self.sequence.len(), track)
    }

    /// Insert a track at `index`, clamped into the sequence bounds
    pub fn insert_track(&mut self, index: usize, track: Track) -> Result<()> {
        let was_empty = self.sequence.is_empty();
        self.sequence.insert_at(index, track);
        if self.shuffle.is_some() {
            self.shuffle = Some(ShuffleOrder::derive(self.track_ids()));
        }
        if was_empty {
            if let Some(head) = self.sequence.head() {
                self.move_current(head)?;
                self.emit_state_changed(PlayerState::Ready);
            }
        }
        self.pending_events.push(PlaybackEvent::SequenceChanged {
            track_count: self.sequence.len(),
        });
        Ok(())
    }

    /// Remove a track from the sequence by id
    ///
    /// Rejected when the removal would leave the sequence empty; the
    /// rejection surfaces both as an error and as a `RemovalRejected`
    /// event. Unknown ids are a no-op. When the current track itself is
    /// removed, the cursor re-anchors to the track that shifted into its
    /// slot, or to the head when the removed track was the tail.
    pub fn remove_track(&mut self, id: &TrackId) -> Result<()> {
        let Some(index) = self.index_of_id(id) else {
            return Ok(());
        };
        if self.sequence.len() == 1 {
            let reason = "cannot remove the last track".to_string();
            tracing::warn!(track_id = %id, "removal rejected: {reason}");
            self.pending_events.push(PlaybackEvent::RemovalRejected {
                track_id: id.clone(),
                reason,
            });
            return Err(PlaybackError::CannotRemoveLastTrack(id.clone()));
        }

        let removing_current = self
            .current
            .upgrade()
            .is_some_and(|node| node.borrow().value().id == *id);

        self.sequence.remove_at(index);
        if self.shuffle.is_some() {
            self.shuffle = Some(ShuffleOrder::derive(self.track_ids()));
        }

        if removing_current {
            // Follower shifted into the removed slot; head when the tail
            // was removed
            let node = self
                .sequence
                .get_at(index)
                .or_else(|| self.sequence.head());
            if let Some(node) = node {
                self.move_current(node)?;
            }
        }

        self.pending_events.push(PlaybackEvent::SequenceChanged {
            track_count: self.sequence.len(),
        });
        Ok(())
    }

    /// Move a track from one index to another (drag reorder)
    ///
    /// Out-of-range `from` is a no-op; `to` clamps. Current-track identity
    /// is preserved by id, never by numeric index.
    pub fn move_track(&mut self, from: usize, to: usize) {
        let current_id = self.current_track().map(|track| track.id);

        let Some(value) = self.sequence.remove_at(from) else {
            return;
        };
        self.sequence.insert_at(to, value);

        if self.shuffle.is_some() {
            self.shuffle = Some(ShuffleOrder::derive(self.track_ids()));
        }

        if let Some(ref current_id) = current_id {
            if let Some(node) = self.node_by_id(current_id) {
                self.current = Rc::downgrade(&node);
            }
        }

        self.pending_events.push(PlaybackEvent::SequenceChanged {
            track_count: self.sequence.len(),
        });
    }

    // ===== State Queries =====

    /// The current track, if any
    pub fn current_track(&self) -> Option<Track> {
        self.current
            .upgrade()
            .map(|node| node.borrow().value().clone())
    }

    /// Numeric index of the current track
    ///
    /// Derived best-effort convenience for the presentation layer; track
    /// identity is authoritative.
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current.upgrade()?;
        self.sequence
            .iter()
            .position(|node| Rc::ptr_eq(&node, &current))
    }

    /// Transport state
    pub fn state(&self) -> PlayerState {
        if self.current.upgrade().is_none() {
            PlayerState::Empty
        } else if self.is_playing {
            PlayerState::Playing
        } else {
            PlayerState::Ready
        }
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Whether shuffled traversal is enabled
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle.is_some()
    }

    /// Output volume in `[0.0, 1.0]`
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Playback position mirrored from telemetry
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Track duration mirrored from telemetry
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of tracks in the sequence
    pub fn track_count(&self) -> usize {
        self.sequence.len()
    }

    /// Read-only projection of the full playback state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_track: self.current_track(),
            current_index: self.current_index(),
            state: self.state(),
            is_playing: self.is_playing,
            repeat: self.repeat,
            shuffle: self.shuffle.is_some(),
            volume: self.volume,
            position: self.position,
            duration: self.duration,
            track_count: self.sequence.len(),
        }
    }

    // ===== Events =====

    /// Drain all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if any events are queued
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    /// Rebind the cursor and output to `node`, continuing playback if the
    /// transport was playing
    fn move_current(&mut self, node: TrackNode) -> Result<()> {
        let previous_id = self
            .current
            .upgrade()
            .map(|current| current.borrow().value().id.clone());

        self.current = Rc::downgrade(&node);
        self.bind_current(&node)?;
        if self.is_playing {
            self.output.play()?;
        }

        let track_id = node.borrow().value().id.clone();
        tracing::debug!(track = %node.borrow().value().title, "current track changed");
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id: previous_id,
        });
        Ok(())
    }

    /// Load `node`'s source into the output and reset mirrored telemetry
    fn bind_current(&mut self, node: &TrackNode) -> Result<()> {
        let source = node.borrow().value().source.clone();
        self.output.load(&source)?;
        self.output.set_volume(self.volume)?;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        Ok(())
    }

    fn restart_current(&mut self) -> Result<()> {
        self.position = Duration::ZERO;
        self.output.seek(Duration::ZERO)?;
        Ok(())
    }

    fn clear_current(&mut self) {
        self.current = Weak::new();
        if self.is_playing {
            self.is_playing = false;
            if let Err(error) = self.output.pause() {
                tracing::warn!(%error, "audio output rejected pause on empty sequence");
            }
        }
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    fn track_ids(&self) -> Vec<TrackId> {
        self.sequence
            .iter()
            .map(|node| node.borrow().value().id.clone())
            .collect()
    }

    fn index_of_id(&self, id: &TrackId) -> Option<usize> {
        self.sequence
            .iter()
            .position(|node| node.borrow().value().id == *id)
    }

    fn node_by_id(&self, id: &TrackId) -> Option<TrackNode> {
        self.sequence
            .iter()
            .find(|node| node.borrow().value().id == *id)
    }

    /// Successor in traversal order (chain, or shuffled when enabled)
    fn successor_of(&self, node: &TrackNode) -> Option<TrackNode> {
        match self.shuffle {
            Some(ref order) => {
                let id = node.borrow().value().id.clone();
                let next_id = order.next_after(&id)?.clone();
                self.node_by_id(&next_id)
            }
            None => node.borrow().next(),
        }
    }

    /// Predecessor in traversal order (chain, or shuffled when enabled)
    fn predecessor_of(&self, node: &TrackNode) -> Option<TrackNode> {
        match self.shuffle {
            Some(ref order) => {
                let id = node.borrow().value().id.clone();
                let prev_id = order.prev_before(&id)?.clone();
                self.node_by_id(&prev_id)
            }
            None => node.borrow().prev(),
        }
    }

    fn first_in_order(&self) -> Option<TrackNode> {
        match self.shuffle {
            Some(ref order) => self.node_by_id(order.first()?),
            None => self.sequence.head(),
        }
    }

    fn last_in_order(&self) -> Option<TrackNode> {
        match self.shuffle {
            Some(ref order) => self.node_by_id(order.last()?),
            None => self.sequence.tail(),
        }
    }

    fn emit_state_changed(&mut self, state: PlayerState) {
        self.pending_events
            .push(PlaybackEvent::StateChanged { state });
    }
}
