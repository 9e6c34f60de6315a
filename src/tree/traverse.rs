//! In-order iteration and post-order teardown.
//!
//! Both walk the tree with [`BoundedStack`]s sized from the tree's length,
//! never with recursion. A path from the root visits at most `len` nodes, so
//! the stacks cannot overflow unless the link graph or the length is corrupt.

use super::RbTree;
use crate::TreeError;
use crate::node::{NodeId, Side};
use crate::stack::BoundedStack;
use crate::tracing_helpers::{debug_log, error_log};

// ============================================================================
//  Iter
// ============================================================================

/// Lazy in-order iterator over `(&K, &V)`, created by [`RbTree::iter`].
///
/// Holds one stack of at most `len` node ids.
///
/// # Panics
///
/// `next` panics if the left spine being descended is longer than the
/// tree's length, which means the tree's links or count are corrupt. Use
/// [`RbTree::iterate`] to get [`TreeError::StackFull`] back instead.
pub struct Iter<'a, K, V> {
    tree: &'a RbTree<K, V>,
    stack: BoundedStack<NodeId>,
    /// Next subtree to descend into; the sentinel when there is none.
    cursor: NodeId,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a RbTree<K, V>) -> Self {
        Self {
            tree,
            stack: BoundedStack::with_capacity(tree.len),
            cursor: tree.root.unwrap_or(NodeId::SENTINEL),
            remaining: tree.len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree: &'a RbTree<K, V> = self.tree;

        while !tree.is_sentinel(self.cursor) {
            if let Err(err) = self.stack.push(self.cursor) {
                error_log!(%err, "iter: stack overflow, tree links are corrupt");
                panic!("in-order iteration overflowed its stack: {err}");
            }
            self.cursor = tree.child(self.cursor, Side::Left);
        }

        let id = self.stack.pop()?;
        self.cursor = tree.child(id, Side::Right);
        self.remaining = self.remaining.saturating_sub(1);

        tree.node(id).entry.as_ref().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> std::iter::FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a RbTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
//  Visiting and teardown
// ============================================================================

impl<K, V> RbTree<K, V> {
    /// Iterate entries in ascending key order.
    ///
    /// Each call starts a fresh traversal.
    ///
    /// # Panics
    ///
    /// The iterator panics on a corrupt tree; see [`Iter`].
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Call `visit` on every entry in ascending key order.
    ///
    /// # Errors
    ///
    /// [`TreeError::StackFull`] if the traversal stack overflows, which only
    /// happens on a corrupt tree. Entries visited before the overflow have
    /// already been passed to `visit`.
    pub fn iterate<F>(&self, mut visit: F) -> Result<(), TreeError>
    where
        F: FnMut(&K, &V),
    {
        self.iterate_with_black_height(|k, v, _| visit(k, v))
    }

    /// Like [`iterate`](Self::iterate), also passing each node's
    /// black-height (black nodes below it on any path, leaf sentinel
    /// included).
    ///
    /// # Errors
    ///
    /// Same as [`iterate`](Self::iterate).
    pub fn iterate_with_black_height<F>(&self, mut visit: F) -> Result<(), TreeError>
    where
        F: FnMut(&K, &V, usize),
    {
        let Some(root) = self.root else {
            return Ok(());
        };

        let mut stack: BoundedStack<(NodeId, usize)> = BoundedStack::with_capacity(self.len);
        let mut cursor = root;
        let mut height = self.black_height_below(root);

        loop {
            while !self.is_sentinel(cursor) {
                stack.push((cursor, height))?;
                let left = self.child(cursor, Side::Left);
                height = self.height_of_child(height, left);
                cursor = left;
            }

            let Some((id, id_height)) = stack.pop() else {
                break;
            };

            if let Some((k, v)) = self.node(id).entry.as_ref() {
                visit(k, v, id_height);
            }

            let right = self.child(id, Side::Right);
            height = self.height_of_child(id_height, right);
            cursor = right;
        }

        Ok(())
    }

    /// Black-height of `child` given its parent's black-height.
    #[inline]
    fn height_of_child(&self, parent_height: usize, child: NodeId) -> usize {
        if self.is_sentinel(child) || self.color(child).is_red() {
            parent_height
        } else {
            parent_height.saturating_sub(1)
        }
    }

    /// Remove every entry, releasing children before their parents.
    ///
    /// Returns the number of nodes released.
    ///
    /// # Errors
    ///
    /// [`TreeError::StackFull`] on a corrupt tree. Nothing is released in
    /// that case.
    pub fn clear(&mut self) -> Result<usize, TreeError> {
        self.teardown()
    }

    /// Tear the tree down and drop it.
    ///
    /// Equivalent to [`clear`](Self::clear) followed by dropping the tree.
    ///
    /// # Errors
    ///
    /// Same as [`clear`](Self::clear). The arena's storage is still freed
    /// when the tree drops.
    pub fn destroy(mut self) -> Result<usize, TreeError> {
        self.teardown()
    }

    /// Post-order teardown with two cooperating stacks.
    ///
    /// The first pass pushes every node onto `order` in root-right-left
    /// order, using `pending` to come back for left subtrees. Popping
    /// `order` then yields left-right-root, so children are released before
    /// their parents. Releasing starts only after the walk succeeds.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(len = self.len)))]
    fn teardown(&mut self) -> Result<usize, TreeError> {
        let Some(root) = self.root else {
            self.arena.reset();
            return Ok(0);
        };

        let mut order: BoundedStack<NodeId> = BoundedStack::with_capacity(self.len);
        let mut pending: BoundedStack<NodeId> = BoundedStack::with_capacity(self.len);
        let mut cursor = root;

        loop {
            while !self.is_sentinel(cursor) {
                order.push(cursor)?;
                pending.push(cursor)?;
                cursor = self.child(cursor, Side::Right);
            }

            let Some(id) = pending.pop() else {
                break;
            };
            cursor = self.child(id, Side::Left);
        }

        let mut released: usize = 0;
        while let Some(id) = order.pop() {
            if self.arena.release(id).is_some() {
                released += 1;
            }
        }

        self.root = None;
        self.len = 0;
        self.arena.reset();

        debug_log!(released, "teardown complete");
        Ok(released)
    }
}

impl<K, V> Drop for RbTree<K, V> {
    fn drop(&mut self) {
        let result = self.teardown();
        if result.is_err() {
            error_log!(?result, "teardown failed, dropping arena wholesale");
        }
    }
}
