//! Error types returned by [`RbTree`](crate::RbTree) operations.

use std::fmt as StdFmt;

use crate::stack::StackFull;

// ============================================================================
//  TreeError
// ============================================================================

/// Errors returned by tree operations.
///
/// No operation partially mutates the tree before returning one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The key is not usable (for example an empty string).
    InvalidArgument,

    /// Insert found an equal key already stored. The tree is unchanged.
    AlreadyExists,

    /// No entry with the requested key.
    NotFound,

    /// An auxiliary traversal stack ran out of room.
    ///
    /// Stacks are sized from the tree's own count, so this indicates a
    /// corrupted count or link graph rather than a caller mistake.
    StackFull {
        /// Capacity the stack was created with.
        capacity: usize,
    },
}

impl StdFmt::Display for TreeError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid key"),

            Self::AlreadyExists => write!(f, "key already exists"),

            Self::NotFound => write!(f, "key not found"),

            Self::StackFull { capacity } => {
                write!(f, "traversal stack full (capacity {capacity})")
            }
        }
    }
}

impl std::error::Error for TreeError {}

impl From<StackFull> for TreeError {
    fn from(err: StackFull) -> Self {
        Self::StackFull {
            capacity: err.capacity,
        }
    }
}

// ============================================================================
//  InvariantViolation
// ============================================================================

/// A structural defect reported by [`RbTree::check_invariants`](crate::RbTree::check_invariants).
///
/// Node positions are arena slot indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root is red.
    RedRoot,

    /// The sentinel is red, carries an entry, or lost its marker.
    CorruptSentinel,

    /// A red node has a red child.
    RedRedEdge {
        /// Slot of the red parent.
        node: usize,
    },

    /// Two paths below a node have different black counts.
    BlackHeightMismatch {
        /// Slot of the node whose subtrees disagree.
        node: usize,
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },

    /// In-order keys are not strictly increasing.
    OutOfOrder {
        /// Slot of the first node that broke the ordering.
        node: usize,
    },

    /// A child's parent link does not point back at its parent, or the root
    /// has a parent.
    BrokenParentLink {
        /// Slot of the node with the wrong back-reference.
        node: usize,
    },

    /// A reachable slot holds no entry.
    VacantSlotLinked {
        /// Slot that was reached through a child link.
        node: usize,
    },

    /// The reachable node count disagrees with the recorded length or with
    /// the arena's live-slot count.
    CountMismatch {
        /// Nodes reached from the root.
        reachable: usize,
        /// Length recorded by the tree.
        recorded: usize,
        /// Live slots recorded by the arena.
        live: usize,
    },
}

impl StdFmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::RedRoot => write!(f, "root is red"),

            Self::CorruptSentinel => write!(f, "sentinel is corrupt"),

            Self::RedRedEdge { node } => write!(f, "red node {node} has a red child"),

            Self::BlackHeightMismatch { node, left, right } => write!(
                f,
                "black-height mismatch below node {node} (left {left}, right {right})"
            ),

            Self::OutOfOrder { node } => write!(f, "key order broken at node {node}"),

            Self::BrokenParentLink { node } => {
                write!(f, "parent link of node {node} is inconsistent")
            }

            Self::VacantSlotLinked { node } => write!(f, "vacant slot {node} is linked"),

            Self::CountMismatch {
                reachable,
                recorded,
                live,
            } => write!(
                f,
                "count mismatch (reachable {reachable}, recorded {recorded}, live {live})"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}
