//! Ordered sequence container
//!
//! Generic doubly-linked list backing the playback sequence. The forward
//! chain is the sole ownership path; backward links are weak observers, so
//! the reference-counted cells never form a cycle.
//!
//! Indexed access is intentionally O(n): playlists run tens to low hundreds
//! of tracks, and the cheap splice operations of a linked chain matter more
//! at that size than lookup speed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared handle to a sequence node
pub type NodeRef<T> = Rc<RefCell<Node<T>>>;

/// One cell in the sequence
///
/// Holds a value plus two traversal links. `next` owns the rest of the
/// chain; `prev` is observation only, used for navigation and never for
/// lifetime.
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    next: Option<NodeRef<T>>,
    prev: Weak<RefCell<Node<T>>>,
}

impl<T> Node<T> {
    fn new(value: T) -> NodeRef<T> {
        Rc::new(RefCell::new(Self {
            value,
            next: None,
            prev: Weak::new(),
        }))
    }

    /// The value stored in this node
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Handle to the successor node, if any
    pub fn next(&self) -> Option<NodeRef<T>> {
        self.next.clone()
    }

    /// Handle to the predecessor node, if any
    pub fn prev(&self) -> Option<NodeRef<T>> {
        self.prev.upgrade()
    }
}

/// Doubly-linked ordered container
///
/// O(1) append/prepend and head/tail access, O(n) indexed operations.
/// `len` always equals the number of nodes reachable by walking forward
/// from the head; an empty sequence has neither head nor tail.
#[derive(Debug)]
pub struct Sequence<T> {
    head: Option<NodeRef<T>>,
    tail: Weak<RefCell<Node<T>>>,
    len: usize,
}

impl<T> Sequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self {
            head: None,
            tail: Weak::new(),
            len: 0,
        }
    }

    /// Number of nodes in the sequence
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First node
    pub fn head(&self) -> Option<NodeRef<T>> {
        self.head.clone()
    }

    /// Last node
    pub fn tail(&self) -> Option<NodeRef<T>> {
        self.tail.upgrade()
    }

    /// Add a value to the end
    pub fn append(&mut self, value: T) {
        let node = Node::new(value);
        match self.tail.upgrade() {
            Some(tail) => {
                node.borrow_mut().prev = Rc::downgrade(&tail);
                tail.borrow_mut().next = Some(Rc::clone(&node));
            }
            None => self.head = Some(Rc::clone(&node)),
        }
        self.tail = Rc::downgrade(&node);
        self.len += 1;
    }

    /// Add a value to the front
    pub fn prepend(&mut self, value: T) {
        let node = Node::new(value);
        match self.head.take() {
            Some(head) => {
                head.borrow_mut().prev = Rc::downgrade(&node);
                node.borrow_mut().next = Some(head);
            }
            None => self.tail = Rc::downgrade(&node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Insert a value at `index`, clamped into `[0, len]`
    ///
    /// Index 0 prepends; indices at or beyond the length append.
    pub fn insert_at(&mut self, index: usize, value: T) {
        if index == 0 {
            self.prepend(value);
        } else if index >= self.len {
            self.append(value);
        } else {
            // index in (0, len): both neighbors exist
            let Some(before) = self.get_at(index - 1) else {
                return;
            };
            let node = Node::new(value);
            let after = before.borrow_mut().next.take();
            node.borrow_mut().prev = Rc::downgrade(&before);
            if let Some(ref after) = after {
                after.borrow_mut().prev = Rc::downgrade(&node);
            }
            node.borrow_mut().next = after;
            before.borrow_mut().next = Some(node);
            self.len += 1;
        }
    }

    /// Remove and return the value at `index`
    ///
    /// Returns `None` without modifying the sequence when `index` is out
    /// of range. Neighbor links are repaired on both sides.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let node = self.get_at(index)?;
        let prev = node.borrow().prev.upgrade();
        let next = node.borrow_mut().next.take();

        match (&prev, &next) {
            (Some(p), Some(n)) => {
                n.borrow_mut().prev = Rc::downgrade(p);
                p.borrow_mut().next = Some(Rc::clone(n));
            }
            (Some(p), None) => {
                p.borrow_mut().next = None;
                self.tail = Rc::downgrade(p);
            }
            (None, Some(n)) => {
                n.borrow_mut().prev = Weak::new();
                self.head = Some(Rc::clone(n));
            }
            (None, None) => {
                self.head = None;
                self.tail = Weak::new();
            }
        }
        self.len -= 1;

        // The unlinked node holds the only remaining strong reference
        Rc::try_unwrap(node)
            .ok()
            .map(|cell| cell.into_inner().value)
    }

    /// Node at `index`, or `None` when out of range
    ///
    /// Linear walk from the head.
    pub fn get_at(&self, index: usize) -> Option<NodeRef<T>> {
        if index >= self.len {
            return None;
        }
        let mut current = self.head.clone();
        for _ in 0..index {
            let next = current.as_ref().and_then(|node| node.borrow().next.clone());
            current = next;
        }
        current
    }

    /// Iterate over node handles from head to tail
    pub fn iter(&self) -> Iter<T> {
        Iter {
            cursor: self.head.clone(),
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Self::new();
        for value in iter {
            sequence.append(value);
        }
        sequence
    }
}

impl<T> Drop for Sequence<T> {
    // Unlink iteratively so dropping a long chain cannot recurse
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(node) = cursor {
            cursor = node.borrow_mut().next.take();
        }
    }
}

/// Forward iterator over node handles
pub struct Iter<T> {
    cursor: Option<NodeRef<T>>,
}

impl<T> Iterator for Iter<T> {
    type Item = NodeRef<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor.take()?;
        self.cursor = node.borrow().next.clone();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn values(sequence: &Sequence<u32>) -> Vec<u32> {
        sequence.iter().map(|node| node.borrow().value).collect()
    }

    /// Walk the chain checking that every adjacent pair links both ways
    fn assert_links_consistent(sequence: &Sequence<u32>) {
        let nodes: Vec<_> = sequence.iter().collect();
        assert_eq!(nodes.len(), sequence.len());

        for pair in nodes.windows(2) {
            let forward = pair[0].borrow().next().expect("forward link missing");
            assert!(Rc::ptr_eq(&forward, &pair[1]));

            let backward = pair[1].borrow().prev().expect("backward link missing");
            assert!(Rc::ptr_eq(&backward, &pair[0]));
        }

        match nodes.first() {
            Some(head) => {
                assert!(head.borrow().prev().is_none());
                let tail = nodes.last().expect("non-empty chain has a tail");
                assert!(tail.borrow().next().is_none());
                let seq_head = sequence.head().expect("head accessor");
                let seq_tail = sequence.tail().expect("tail accessor");
                assert!(Rc::ptr_eq(&seq_head, head));
                assert!(Rc::ptr_eq(&seq_tail, tail));
            }
            None => {
                assert!(sequence.head().is_none());
                assert!(sequence.tail().is_none());
                assert_eq!(sequence.len(), 0);
            }
        }
    }

    #[test]
    fn empty_sequence() {
        let sequence: Sequence<u32> = Sequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.len(), 0);
        assert!(sequence.head().is_none());
        assert!(sequence.tail().is_none());
        assert!(sequence.get_at(0).is_none());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let sequence: Sequence<u32> = (0..5).collect();

        for i in 0..5 {
            let node = sequence.get_at(i).unwrap();
            assert_eq!(node.borrow().value, i as u32);
        }
        assert!(sequence.get_at(5).is_none());
        assert_links_consistent(&sequence);
    }

    #[test]
    fn prepend_adds_to_front() {
        let mut sequence = Sequence::new();
        sequence.append(2);
        sequence.prepend(1);
        sequence.prepend(0);

        assert_eq!(values(&sequence), vec![0, 1, 2]);
        assert_links_consistent(&sequence);
    }

    #[test]
    fn insert_at_clamps_to_bounds() {
        let mut sequence: Sequence<u32> = vec![1, 3].into_iter().collect();

        sequence.insert_at(1, 2); // interior
        sequence.insert_at(0, 0); // front
        sequence.insert_at(99, 4); // past the end appends

        assert_eq!(values(&sequence), vec![0, 1, 2, 3, 4]);
        assert_links_consistent(&sequence);
    }

    #[test]
    fn remove_at_out_of_range_is_noop() {
        let mut sequence: Sequence<u32> = vec![1, 2].into_iter().collect();

        assert!(sequence.remove_at(2).is_none());
        assert_eq!(sequence.len(), 2);
        assert_eq!(values(&sequence), vec![1, 2]);
    }

    #[test]
    fn remove_head_tail_and_middle() {
        let mut sequence: Sequence<u32> = (0..5).collect();

        assert_eq!(sequence.remove_at(0), Some(0));
        assert_eq!(sequence.remove_at(3), Some(4));
        assert_eq!(sequence.remove_at(1), Some(2));

        assert_eq!(values(&sequence), vec![1, 3]);
        assert_links_consistent(&sequence);
    }

    #[test]
    fn remove_last_node_empties_sequence() {
        let mut sequence: Sequence<u32> = vec![7].into_iter().collect();

        assert_eq!(sequence.remove_at(0), Some(7));
        assert!(sequence.is_empty());
        assert!(sequence.head().is_none());
        assert!(sequence.tail().is_none());
    }

    #[test]
    fn append_then_remove_restores_endpoints() {
        let mut sequence: Sequence<u32> = vec![1, 2, 3].into_iter().collect();
        let head_before = sequence.head().unwrap();
        let tail_before = sequence.tail().unwrap();

        sequence.append(4);
        assert_eq!(sequence.remove_at(3), Some(4));

        assert_eq!(sequence.len(), 3);
        assert!(Rc::ptr_eq(&sequence.head().unwrap(), &head_before));
        assert!(Rc::ptr_eq(&sequence.tail().unwrap(), &tail_before));
    }

    #[test]
    fn iter_visits_all_nodes_in_order() {
        let sequence: Sequence<u32> = (0..4).collect();
        let collected: Vec<u32> = sequence.iter().map(|node| node.borrow().value).collect();
        assert_eq!(collected, vec![0, 1, 2, 3]);
    }

    #[test]
    fn long_chain_drops_without_overflow() {
        let sequence: Sequence<u32> = (0..100_000).collect();
        assert_eq!(sequence.len(), 100_000);
        drop(sequence);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Append(u32),
        Prepend(u32),
        Insert(usize, u32),
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u32>().prop_map(Op::Append),
            any::<u32>().prop_map(Op::Prepend),
            (0usize..32, any::<u32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            (0usize..32).prop_map(Op::Remove),
        ]
    }

    proptest! {
        // The sequence must behave exactly like a Vec under the same
        // clamp/no-op index semantics, with links intact throughout.
        #[test]
        fn behaves_like_vec_model(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let mut sequence = Sequence::new();
            let mut model: Vec<u32> = Vec::new();

            for op in ops {
                match op {
                    Op::Append(v) => {
                        sequence.append(v);
                        model.push(v);
                    }
                    Op::Prepend(v) => {
                        sequence.prepend(v);
                        model.insert(0, v);
                    }
                    Op::Insert(i, v) => {
                        sequence.insert_at(i, v);
                        model.insert(i.min(model.len()), v);
                    }
                    Op::Remove(i) => {
                        let removed = sequence.remove_at(i);
                        if i < model.len() {
                            prop_assert_eq!(removed, Some(model.remove(i)));
                        } else {
                            prop_assert_eq!(removed, None);
                        }
                    }
                }

                prop_assert_eq!(sequence.len(), model.len());
            }

            prop_assert_eq!(values(&sequence), model);
            assert_links_consistent(&sequence);
        }
    }
}
