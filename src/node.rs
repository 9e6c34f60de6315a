//! Tree nodes, colors, and arena handles.
//!
//! A [`Node`] never holds pointers. Child links are [`NodeId`] indices into
//! the owning [`ArenaAllocator`](crate::alloc::ArenaAllocator); the parent link
//! is an `Option<NodeId>` back-reference that carries no ownership.
//!
//! Slot [`NodeId::SENTINEL`] of every arena holds that tree's sentinel: an
//! always-black node flagged with `is_sentinel`, standing in for every empty
//! child link.

use std::fmt as StdFmt;

// ============================================================================
//  Color
// ============================================================================

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red node. Never the root, never the parent of another red node.
    Red,
    /// Black node. Counted by black-height.
    Black,
}

impl Color {
    /// Whether this is [`Color::Red`].
    #[inline(always)]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    /// Whether this is [`Color::Black`].
    #[inline(always)]
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }
}

// ============================================================================
//  Side
// ============================================================================

/// Which child of a node.
///
/// The fixup state machines are written once for one side and mirrored by
/// passing [`Side::opposite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline(always)]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// ============================================================================
//  NodeId
// ============================================================================

/// Index of a node slot inside its tree's arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// The per-tree sentinel always lives in slot 0.
    pub(crate) const SENTINEL: Self = Self(0);

    #[inline(always)]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

impl StdFmt::Debug for NodeId {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        if *self == Self::SENTINEL {
            write!(f, "NodeId(nil)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

// ============================================================================
//  Node
// ============================================================================

/// One arena slot: a live node, the sentinel, or a vacant slot awaiting reuse.
pub(crate) struct Node<K, V> {
    pub(crate) color: Color,

    /// Set only on slot 0. Marks the sentinel independently of its index.
    pub(crate) is_sentinel: bool,

    /// Non-owning back-reference. `None` for the root, the sentinel, and
    /// vacant slots.
    pub(crate) parent: Option<NodeId>,

    /// Owning child links. [`NodeId::SENTINEL`] when empty.
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,

    /// `None` for the sentinel and for vacant slots.
    pub(crate) entry: Option<(K, V)>,
}

impl<K, V> Node<K, V> {
    /// The sentinel: black, childless, entry-less.
    pub(crate) const fn sentinel() -> Self {
        Self {
            color: Color::Black,
            is_sentinel: true,
            parent: None,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
            entry: None,
        }
    }

    /// A fresh red leaf. Both children are the sentinel.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            color: Color::Red,
            is_sentinel: false,
            parent: None,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
            entry: Some((key, value)),
        }
    }

    #[inline(always)]
    pub(crate) const fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline(always)]
    pub(crate) fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(k, _)| k)
    }
}

impl<K, V> StdFmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("Node")
            .field("color", &self.color)
            .field("is_sentinel", &self.is_sentinel)
            .field("parent", &self.parent)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("occupied", &self.entry.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_black_and_empty() {
        let nil: Node<u32, u32> = Node::sentinel();

        assert!(nil.is_sentinel);
        assert!(nil.color.is_black());
        assert!(nil.key().is_none());
        assert_eq!(nil.left, NodeId::SENTINEL);
        assert_eq!(nil.right, NodeId::SENTINEL);
    }

    #[test]
    fn test_leaf_starts_red() {
        let node = Node::leaf(5_u32, "five");

        assert!(!node.is_sentinel);
        assert!(node.color.is_red());
        assert_eq!(node.key(), Some(&5));
        assert_eq!(node.child(Side::Left), NodeId::SENTINEL);
        assert_eq!(node.child(Side::Right), NodeId::SENTINEL);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn test_node_id_debug() {
        assert_eq!(format!("{:?}", NodeId::SENTINEL), "NodeId(nil)");
        assert_eq!(format!("{:?}", NodeId::new(3)), "NodeId(3)");
    }
}
