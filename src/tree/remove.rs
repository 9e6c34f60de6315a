//! Deletion and delete-fixup.
//!
//! Removing a black node leaves one path short by a black node. That deficit
//! ("double black") sits on the node that moved into the vacated position,
//! which may be the sentinel. Because the sentinel's parent link is never
//! written, the fixup carries the deficit node's parent alongside it.

use std::borrow::Borrow;

use super::{RbTree, Search};
use crate::TreeError;
use crate::key::TreeKey;
use crate::node::{Color, NodeId, Side};
use crate::tracing_helpers::{debug_log, trace_log, warn_log};

/// Where the deficit lands after a structural unlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unlinked {
    /// Color of the node that left its position in the tree.
    removed_color: Color,

    /// Node now occupying that position (possibly the sentinel).
    deficit: NodeId,

    /// Parent of `deficit`. `None` when `deficit` is the new root or the tree
    /// became empty.
    deficit_parent: Option<NodeId>,
}

impl<K: Ord, V> RbTree<K, V> {
    /// Remove `key` and return its value.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidArgument`] if `key` fails [`TreeKey::is_valid_key`].
    /// - [`TreeError::NotFound`] if no entry has this key.
    ///
    /// The tree is unchanged on error.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, TreeError>
    where
        K: Borrow<Q>,
        Q: TreeKey + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key` and return the stored key and value.
    ///
    /// # Errors
    ///
    /// Same as [`delete`](Self::delete).
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V), TreeError>
    where
        K: Borrow<Q>,
        Q: TreeKey + ?Sized,
    {
        if !key.is_valid_key() {
            warn_log!("delete: invalid key rejected");
            return Err(TreeError::InvalidArgument);
        }

        let Search::Found(target) = self.search(key) else {
            return Err(TreeError::NotFound);
        };

        let unlinked = self.unlink(target);
        if unlinked.removed_color.is_black() {
            self.delete_fixup(unlinked.deficit, unlinked.deficit_parent);
        }

        let Some(entry) = self.arena.release(target) else {
            unreachable!("search matched a key at {target:?}, so its slot is occupied");
        };
        self.len -= 1;

        debug_log!(?target, len = self.len, "delete complete");
        Ok(entry)
    }
}

impl<K, V> RbTree<K, V> {
    /// Detach `target` from the tree, leaving its slot allocated.
    ///
    /// With at most one real child, that child (or the sentinel) takes the
    /// target's place. With two, the in-order successor is spliced out of
    /// its own position and takes the target's place and color; the deficit
    /// then belongs to the successor's old position.
    fn unlink(&mut self, target: NodeId) -> Unlinked {
        let left = self.child(target, Side::Left);
        let right = self.child(target, Side::Right);

        if self.is_sentinel(left) || self.is_sentinel(right) {
            let only = if self.is_sentinel(left) { right } else { left };
            let deficit_parent = self.parent(target);
            self.transplant(target, only);

            return Unlinked {
                removed_color: self.color(target),
                deficit: only,
                deficit_parent,
            };
        }

        let successor = self.extreme(right, Side::Left);
        let removed_color = self.color(successor);
        let deficit = self.child(successor, Side::Right);

        let deficit_parent = if successor == right {
            // The successor keeps its right subtree and moves up one level,
            // so the deficit hangs directly below it.
            successor
        } else {
            let old_parent = self.parent(successor).unwrap_or(right);
            self.transplant(successor, deficit);
            self.attach(Some(successor), Side::Right, right);
            old_parent
        };

        self.transplant(target, successor);
        self.attach(Some(successor), Side::Left, left);
        let target_color = self.color(target);
        self.set_color(successor, target_color);

        Unlinked {
            removed_color,
            deficit,
            deficit_parent: Some(deficit_parent),
        }
    }

    /// Restore the red-black invariants after a black node left the position
    /// now held by `node`, whose parent is `parent`.
    fn delete_fixup(&mut self, mut node: NodeId, mut parent: Option<NodeId>) {
        while let Some(p) = parent {
            if self.is_red(node) {
                break;
            }

            let side = self.side_of(p, node);
            let far_side = side.opposite();
            let mut sibling = self.child(p, far_side);
            // The sibling's subtree is at least one black node taller than
            // the deficit side, so it is never the sentinel.
            debug_assert!(!self.is_sentinel(sibling), "deficit at {node:?} without sibling");

            if self.is_red(sibling) {
                trace_log!(?p, "delete-fixup: red sibling, rotate parent");
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.child(p, far_side);
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, far_side);

            if !self.is_red(near) && !self.is_red(far) {
                trace_log!(?p, "delete-fixup: black nephews, push deficit up");
                self.set_color(sibling, Color::Red);
                node = p;
                parent = self.parent(p);
                continue;
            }

            if !self.is_red(far) {
                trace_log!(?sibling, "delete-fixup: red near nephew, rotate sibling");
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far_side);
                sibling = self.child(p, far_side);
            }

            trace_log!(?p, "delete-fixup: red far nephew, rotate parent");
            let parent_color = self.color(p);
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            let far = self.child(sibling, far_side);
            self.set_color(far, Color::Black);
            self.rotate(p, side);

            if let Some(root) = self.root {
                node = root;
            }
            break;
        }

        if !self.is_sentinel(node) {
            self.set_color(node, Color::Black);
        }
    }
}
