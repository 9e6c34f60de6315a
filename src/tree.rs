//! `RbTree` - an arena-backed red-black ordered map.
//!
//! This module holds the tree type, lookup, and the node accessors shared by
//! the mutation and rebalancing submodules:
//!
//! - [`links`]: `attach`, `transplant`, and the rotations. The only code that
//!   rewrites child or parent links.
//! - [`insert`]: insertion and insert-fixup.
//! - [`remove`]: deletion and delete-fixup.
//! - [`traverse`]: in-order iteration and post-order teardown.
//! - [`validate`]: the invariant checker.
//! - [`shared`]: a mutex-wrapped tree for callers that share one across
//!   threads.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt as StdFmt;

use crate::alloc::ArenaAllocator;
use crate::node::{Color, Node, NodeId, Side};

mod insert;
mod links;
mod remove;
mod shared;
mod traverse;
mod validate;

pub use shared::SharedTree;
pub use traverse::Iter;

/// A red-black tree mapping unique keys to values.
///
/// All nodes live in one [`ArenaAllocator`]. Each tree owns a private
/// sentinel node standing in for every empty child link.
///
/// Inserting a key that is already present fails with
/// [`TreeError::AlreadyExists`](crate::TreeError::AlreadyExists); it never
/// overwrites.
///
/// # Thread Safety
///
/// `RbTree` has no internal synchronization. Mutation takes `&mut self`, so
/// sharing across threads needs an external lock; [`SharedTree`] is one.
///
/// # Example
///
/// ```rust
/// use rbtree::{RbTree, TreeError};
///
/// let mut tree = RbTree::new();
/// tree.insert(String::from("b"), 2).unwrap();
/// tree.insert(String::from("a"), 1).unwrap();
///
/// assert_eq!(tree.insert(String::from("a"), 9), Err(TreeError::AlreadyExists));
/// assert_eq!(tree.find("a"), Some(&1));
///
/// let keys: Vec<&str> = tree.iter().map(|(k, _)| k.as_str()).collect();
/// assert_eq!(keys, ["a", "b"]);
/// ```
pub struct RbTree<K, V> {
    /// Node storage. Slot 0 is this tree's sentinel.
    arena: ArenaAllocator<K, V>,

    /// `None` when the tree is empty.
    root: Option<NodeId>,

    /// Number of entries.
    len: usize,
}

/// Outcome of a search descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Search {
    /// The key is stored at this node.
    Found(NodeId),

    /// The key is absent. A new node would hang off `parent` on `side`
    /// (`parent` is `None` for an empty tree).
    Vacant { parent: Option<NodeId>, side: Side },
}

// ============================================================================
//  Construction and size
// ============================================================================

impl<K, V> RbTree<K, V> {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty tree whose arena holds `capacity` nodes before
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: ArenaAllocator::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Number of entries.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the node arena (slot and free-list counts).
    #[must_use]
    #[inline]
    pub const fn arena(&self) -> &ArenaAllocator<K, V> {
        &self.arena
    }

    /// Black-height of the root: black nodes on any root-to-leaf path,
    /// counting the leaf sentinel and excluding the root. `0` when empty.
    #[must_use]
    pub fn black_height(&self) -> usize {
        self.root.map_or(0, |root| self.black_height_below(root))
    }

    /// Smallest entry.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        let root = self.root?;
        let node = self.arena.node(self.extreme(root, Side::Left));
        node.entry.as_ref().map(|(k, v)| (k, v))
    }

    /// Largest entry.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        let root = self.root?;
        let node = self.arena.node(self.extreme(root, Side::Right));
        node.entry.as_ref().map(|(k, v)| (k, v))
    }

    // ========================================================================
    //  Node accessors
    // ========================================================================

    #[inline(always)]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        self.arena.node(id)
    }

    #[inline(always)]
    pub(crate) fn is_sentinel(&self, id: NodeId) -> bool {
        self.arena.node(id).is_sentinel
    }

    /// The sentinel reports black, so callers never branch on missing
    /// children.
    #[inline(always)]
    pub(crate) fn color(&self, id: NodeId) -> Color {
        self.arena.node(id).color
    }

    #[inline(always)]
    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        self.color(id).is_red()
    }

    #[inline(always)]
    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).parent
    }

    #[inline(always)]
    pub(crate) fn child(&self, id: NodeId, side: Side) -> NodeId {
        self.arena.node(id).child(side)
    }

    /// Which child of `parent` the node `child` is.
    ///
    /// Works for a sentinel `child` as long as `parent` has exactly one
    /// sentinel child, which holds wherever the fixups ask.
    #[inline(always)]
    pub(crate) fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.child(parent, Side::Left) == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Recolor a node. Writes to the sentinel are dropped; it stays black.
    #[inline(always)]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        let node = self.arena.node_mut(id);
        if node.is_sentinel {
            debug_assert!(color.is_black(), "sentinel must stay black");
            return;
        }
        node.color = color;
    }

    /// Follow `side` links from `from` to the last real node.
    pub(crate) fn extreme(&self, from: NodeId, side: Side) -> NodeId {
        let mut cur = from;
        loop {
            let next = self.child(cur, side);
            if self.is_sentinel(next) {
                return cur;
            }
            cur = next;
        }
    }

    /// Black nodes on the leftmost path below `id`, sentinel included.
    pub(crate) fn black_height_below(&self, id: NodeId) -> usize {
        let mut height = 1;
        let mut cur = self.child(id, Side::Left);
        while !self.is_sentinel(cur) {
            if self.color(cur).is_black() {
                height += 1;
            }
            cur = self.child(cur, Side::Left);
        }
        height
    }

    /// Binary-search descent from the root.
    pub(crate) fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut parent: Option<NodeId> = None;
        let mut side = Side::Left;
        let Some(mut cur) = self.root else {
            return Search::Vacant { parent, side };
        };

        loop {
            let node = self.arena.node(cur);
            // Only the sentinel (or a vacant slot) lacks a key.
            let Some(stored) = node.key() else {
                break;
            };

            match key.cmp(stored.borrow()) {
                Ordering::Equal => return Search::Found(cur),
                Ordering::Less => side = Side::Left,
                Ordering::Greater => side = Side::Right,
            }

            parent = Some(cur);
            cur = node.child(side);
        }

        Search::Vacant { parent, side }
    }
}

// ============================================================================
//  Lookup
// ============================================================================

impl<K: Ord, V> RbTree<K, V> {
    /// Look up a value by key.
    ///
    /// The key may be any borrowed form of `K` with the same ordering.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => self.node(id).entry.as_ref().map(|(_, v)| v),
            Search::Vacant { .. } => None,
        }
    }

    /// Look up a key and return the stored key and value.
    #[must_use]
    pub fn find_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => self.node(id).entry.as_ref().map(|(k, v)| (k, v)),
            Search::Vacant { .. } => None,
        }
    }

    /// Mutable access to a stored value. The tree's shape is unaffected.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => self.arena.node_mut(id).entry.as_mut().map(|(_, v)| v),
            Search::Vacant { .. } => None,
        }
    }

    /// Whether `key` is stored.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        matches!(self.search(key), Search::Found(_))
    }
}

impl<K, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StdFmt::Debug, V: StdFmt::Debug> StdFmt::Debug for RbTree<K, V> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ============================================================================
//  Tests
// ============================================================================
