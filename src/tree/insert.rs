//! Insertion and insert-fixup.

use super::{RbTree, Search};
use crate::TreeError;
use crate::key::TreeKey;
use crate::node::{Color, NodeId};
use crate::tracing_helpers::{debug_log, trace_log, warn_log};

impl<K: TreeKey, V> RbTree<K, V> {
    /// Insert a new entry.
    ///
    /// The new node starts red and is rebalanced before this returns.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidArgument`] if `key` fails [`TreeKey::is_valid_key`].
    /// - [`TreeError::AlreadyExists`] if an equal key is stored. The stored
    ///   value is kept and the tree is unchanged.
    ///
    /// In both cases `key` and `value` are dropped.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TreeError> {
        if !key.is_valid_key() {
            warn_log!("insert: invalid key rejected");
            return Err(TreeError::InvalidArgument);
        }

        let (parent, side) = match self.search(&key) {
            Search::Found(_) => {
                trace_log!("insert: key already present");
                return Err(TreeError::AlreadyExists);
            }
            Search::Vacant { parent, side } => (parent, side),
        };

        let node: NodeId = self.arena.alloc(key, value);
        self.attach(parent, side, node);
        self.len += 1;

        self.insert_fixup(node);

        debug_log!(?node, len = self.len, "insert complete");
        Ok(())
    }

    /// Restore the red-black invariants after linking the red node `node`.
    ///
    /// The only possible violations are a red root or a red node with a red
    /// parent; each iteration either resolves the red-red edge with at most
    /// two rotations or pushes it two levels up.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(mut parent) = self.parent(node) {
            if !self.is_red(parent) {
                break;
            }

            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.parent(parent) else {
                break;
            };

            let side = self.side_of(grandparent, parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                trace_log!(?grandparent, "insert-fixup: red uncle, recolor and move up");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if node == self.child(parent, side.opposite()) {
                trace_log!(?node, "insert-fixup: inner grandchild, rotate parent");
                self.rotate(parent, side);
                std::mem::swap(&mut node, &mut parent);
            }

            trace_log!(?grandparent, "insert-fixup: outer grandchild, rotate grandparent");
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }
}
