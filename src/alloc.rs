//! Node storage for [`RbTree`](crate::RbTree).
//!
//! [`ArenaAllocator`] owns every node of one tree in a single `Vec`. Nodes
//! refer to each other by [`NodeId`] index, so parent back-references are
//! plain integers and no ownership cycle can form.
//!
//! Released slots go on a free list and are handed out again by the next
//! allocation. Slot 0 is reserved for the tree's sentinel and is never
//! released.

use crate::node::{Node, NodeId};

/// Arena of tree nodes with slot reuse.
///
/// # Invariants
///
/// - `nodes[0]` is the sentinel for the whole lifetime of the arena.
/// - Every index in `free` names a vacant slot (no entry, not the sentinel).
/// - `live` equals the number of occupied slots.
#[derive(Debug)]
pub struct ArenaAllocator<K, V> {
    /// All slots. Index 0 is the sentinel.
    nodes: Vec<Node<K, V>>,

    /// Vacant slots available for reuse, most recently released last.
    free: Vec<NodeId>,

    /// Number of occupied slots.
    live: usize,
}

impl<K, V> ArenaAllocator<K, V> {
    /// Create an arena holding only the sentinel.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an arena with room for `capacity` nodes before reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes: Vec<Node<K, V>> = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(Node::sentinel());

        Self {
            nodes,
            free: Vec::new(),
            live: 0,
        }
    }

    /// Number of occupied slots.
    #[inline]
    #[must_use]
    pub const fn live_count(&self) -> usize {
        self.live
    }

    /// Number of vacant slots waiting for reuse.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total slots, including the sentinel and vacant slots.
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Store a new red leaf and return its slot.
    ///
    /// Reuses a vacant slot when one exists.
    pub(crate) fn alloc(&mut self, key: K, value: V) -> NodeId {
        let node = Node::leaf(key, value);
        self.live += 1;

        if let Some(id) = self.free.pop() {
            #[allow(clippy::indexing_slicing)]
            {
                self.nodes[id.index()] = node;
            }
            return id;
        }

        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }

    /// Vacate a slot and hand back its entry.
    ///
    /// Returns `None` (and changes nothing) for the sentinel or an already
    /// vacant slot.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<(K, V)> {
        let node = self.nodes.get_mut(id.index())?;
        if node.is_sentinel {
            return None;
        }

        let entry = node.entry.take()?;
        node.parent = None;
        node.left = NodeId::SENTINEL;
        node.right = NodeId::SENTINEL;

        self.free.push(id);
        self.live -= 1;
        Some(entry)
    }

    /// Drop every slot except the sentinel.
    ///
    /// Callers release nodes individually first when teardown order matters;
    /// this only reclaims the emptied storage.
    pub(crate) fn reset(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
        self.live = 0;
    }

    /// Borrow a slot.
    ///
    /// Ids are produced only by this arena, so an out-of-range id is a bug in
    /// the tree's link graph.
    #[inline(always)]
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.index()]
    }

    #[inline(always)]
    #[allow(clippy::indexing_slicing)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.index()]
    }
}

impl<K, V> Default for ArenaAllocator<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
//  Tests
// ============================================================================
