//! Link primitives: `attach`, `transplant`, and the rotations.
//!
//! Nothing else in the crate writes a `left`, `right`, or `parent` field.
//! None of these ever writes a field of the sentinel: a sentinel child is
//! stored in its parent's link, but its own `parent` stays untouched.

use super::RbTree;
use crate::node::{NodeId, Side};
use crate::tracing_helpers::trace_log;

impl<K, V> RbTree<K, V> {
    /// Hang `child` off `parent` on `side`, or make it the root when
    /// `parent` is `None`. A sentinel `child` clears the link (or empties the
    /// tree).
    pub(crate) fn attach(&mut self, parent: Option<NodeId>, side: Side, child: NodeId) {
        let child_is_sentinel = self.is_sentinel(child);

        match parent {
            None => self.root = (!child_is_sentinel).then_some(child),
            Some(p) => {
                let node = self.arena.node_mut(p);
                match side {
                    Side::Left => node.left = child,
                    Side::Right => node.right = child,
                }
            }
        }

        if !child_is_sentinel {
            self.arena.node_mut(child).parent = parent;
        }
    }

    /// Put the subtree rooted at `src` where the subtree rooted at `dest`
    /// hangs. `dest`'s own links are left as they were.
    pub(crate) fn transplant(&mut self, dest: NodeId, src: NodeId) {
        let parent = self.parent(dest);
        let side = parent.map_or(Side::Left, |p| self.side_of(p, dest));
        self.attach(parent, side, src);
    }

    /// Rotate `node` down toward `side`; its child on the opposite side
    /// takes its place. `Side::Left` is a left rotation (the right child
    /// rises), `Side::Right` a right rotation. In-order sequence is preserved.
    ///
    /// ```text
    ///   rotate(x, Left):
    ///
    ///       x                y
    ///      / \              / \
    ///     a   y     =>     x   c
    ///        / \          / \
    ///       b   c        a   b
    /// ```
    pub(crate) fn rotate(&mut self, node: NodeId, side: Side) {
        let rising_side = side.opposite();
        let rising = self.child(node, rising_side);
        debug_assert!(
            !self.is_sentinel(rising),
            "rotate {node:?}: no {rising_side:?} child to raise"
        );
        if self.is_sentinel(rising) {
            return;
        }

        trace_log!(?node, ?side, "rotate");

        let inner = self.child(rising, side);
        let parent = self.parent(node);
        let node_side = parent.map_or(Side::Left, |p| self.side_of(p, node));

        self.attach(Some(node), rising_side, inner);
        self.attach(parent, node_side, rising);
        self.attach(Some(rising), side, node);
    }
}
