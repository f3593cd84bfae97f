//! Shuffled traversal order
//!
//! Secondary randomized index mapping over track ids (Fisher-Yates). The
//! permutation is re-derived on every rebuild and on every sequence
//! mutation, so it never holds stale ids; next/previous consult it instead
//! of the chain links while shuffle is enabled.

use rand::seq::SliceRandom;
use rand::thread_rng;
use reel_core::TrackId;

/// Randomized traversal order over the current sequence
#[derive(Debug, Clone, Default)]
pub struct ShuffleOrder {
    order: Vec<TrackId>,
}

impl ShuffleOrder {
    /// Derive a fresh permutation of `ids`
    pub fn derive(ids: Vec<TrackId>) -> Self {
        let mut order = ids;
        order.shuffle(&mut thread_rng());
        Self { order }
    }

    /// Id that follows `id` in shuffled order
    ///
    /// `None` when `id` is last in the permutation or unknown.
    pub fn next_after(&self, id: &TrackId) -> Option<&TrackId> {
        let position = self.order.iter().position(|candidate| candidate == id)?;
        self.order.get(position + 1)
    }

    /// Id that precedes `id` in shuffled order
    ///
    /// `None` when `id` is first in the permutation or unknown.
    pub fn prev_before(&self, id: &TrackId) -> Option<&TrackId> {
        let position = self.order.iter().position(|candidate| candidate == id)?;
        position.checked_sub(1).and_then(|prev| self.order.get(prev))
    }

    /// First id in shuffled order
    pub fn first(&self) -> Option<&TrackId> {
        self.order.first()
    }

    /// Last id in shuffled order
    pub fn last(&self) -> Option<&TrackId> {
        self.order.last()
    }

    /// Number of ids in the permutation
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the permutation is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(n: usize) -> Vec<TrackId> {
        (0..n).map(|i| TrackId::new(format!("track-{i}"))).collect()
    }

    #[test]
    fn derive_preserves_all_ids() {
        let source = ids(10);
        let order = ShuffleOrder::derive(source.clone());

        assert_eq!(order.len(), 10);

        let original: HashSet<TrackId> = source.into_iter().collect();
        let mut walked = HashSet::new();
        let mut cursor = order.first().cloned();
        while let Some(id) = cursor {
            cursor = order.next_after(&id).cloned();
            walked.insert(id);
        }
        assert_eq!(walked, original);
    }

    #[test]
    fn forward_walk_visits_each_id_once() {
        let order = ShuffleOrder::derive(ids(5));

        let mut visited = Vec::new();
        let mut cursor = order.first().cloned();
        while let Some(id) = cursor {
            cursor = order.next_after(&id).cloned();
            visited.push(id);
        }

        assert_eq!(visited.len(), 5);
        let unique: HashSet<&TrackId> = visited.iter().collect();
        assert_eq!(unique.len(), 5);
        assert_eq!(visited.last(), order.last());
    }

    #[test]
    fn backward_walk_mirrors_forward_walk() {
        let order = ShuffleOrder::derive(ids(5));

        let mut forward = Vec::new();
        let mut cursor = order.first().cloned();
        while let Some(id) = cursor {
            cursor = order.next_after(&id).cloned();
            forward.push(id);
        }

        let mut backward = Vec::new();
        let mut cursor = order.last().cloned();
        while let Some(id) = cursor {
            cursor = order.prev_before(&id).cloned();
            backward.push(id);
        }
        backward.reverse();

        assert_eq!(forward, backward);
    }

    #[test]
    fn endpoints_have_no_neighbors_outward() {
        let order = ShuffleOrder::derive(ids(3));

        let first = order.first().unwrap().clone();
        let last = order.last().unwrap().clone();
        assert!(order.prev_before(&first).is_none());
        assert!(order.next_after(&last).is_none());
    }

    #[test]
    fn unknown_id_has_no_neighbors() {
        let order = ShuffleOrder::derive(ids(3));
        let stranger = TrackId::new("not-in-order");

        assert!(order.next_after(&stranger).is_none());
        assert!(order.prev_before(&stranger).is_none());
    }

    #[test]
    fn empty_order() {
        let order = ShuffleOrder::derive(Vec::new());
        assert!(order.is_empty());
        assert!(order.first().is_none());
        assert!(order.last().is_none());
    }
}
