//! Structural invariant checking.
//!
//! [`RbTree::check_invariants`] walks the whole tree and reports the first
//! violation it finds. It is O(n), runs on a [`BoundedStack`] rather than
//! recursion, and is meant for tests and debugging.

use super::RbTree;
use crate::error::InvariantViolation;
use crate::node::{NodeId, Side};
use crate::stack::BoundedStack;

/// Where a node is in the post-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Left subtree not entered yet.
    Descend,
    /// Left subtree done; check the key, then enter the right subtree.
    Visit,
    /// Both subtrees done; compare their black-heights.
    Finish,
}

impl<K: Ord, V> RbTree<K, V> {
    /// Check every red-black and structural invariant.
    ///
    /// Verified:
    ///
    /// - the sentinel is black, flagged, entry-less, and childless
    /// - the root is black and has no parent
    /// - no red node has a red child
    /// - every root-to-leaf path has the same number of black nodes
    /// - in-order keys are strictly increasing
    /// - every child's parent link points back at its parent
    /// - reachable nodes, the recorded length, and the arena's live count agree
    ///
    /// Returns the root's black-height (`0` for an empty tree).
    ///
    /// # Errors
    ///
    /// The first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        let nil = self.node(NodeId::SENTINEL);
        if !nil.is_sentinel
            || !nil.color.is_black()
            || nil.entry.is_some()
            || nil.left != NodeId::SENTINEL
            || nil.right != NodeId::SENTINEL
        {
            return Err(InvariantViolation::CorruptSentinel);
        }

        let (height, reachable) = match self.root {
            None => (0, 0),
            Some(root) => {
                if self.parent(root).is_some() {
                    return Err(InvariantViolation::BrokenParentLink { node: root.index() });
                }
                if self.is_red(root) {
                    return Err(InvariantViolation::RedRoot);
                }
                self.walk_checked(root)?
            }
        };

        let live = self.arena.live_count();
        if reachable != self.len || live != self.len {
            return Err(InvariantViolation::CountMismatch {
                reachable,
                recorded: self.len,
                live,
            });
        }

        Ok(height)
    }

    /// Post-order walk from `root` returning its black-height and the number
    /// of nodes reached.
    ///
    /// A child is only pushed after its parent link is confirmed, so every
    /// slot is entered at most once and a stack of `slot_count` entries
    /// cannot overflow.
    #[allow(clippy::indexing_slicing)]
    fn walk_checked(&self, root: NodeId) -> Result<(usize, usize), InvariantViolation> {
        let slots = self.arena.slot_count();
        let mut heights: Vec<usize> = vec![0; slots];
        let mut stack: BoundedStack<(NodeId, Stage)> = BoundedStack::with_capacity(slots);
        let mut prev_key: Option<&K> = None;
        let mut reachable: usize = 0;

        let overflow = |reachable: usize| InvariantViolation::CountMismatch {
            reachable,
            recorded: self.len,
            live: self.arena.live_count(),
        };

        stack.push((root, Stage::Descend)).map_err(|_| overflow(reachable))?;

        while let Some((id, stage)) = stack.pop() {
            let node = self.node(id);
            let Some(key) = node.key() else {
                return Err(InvariantViolation::VacantSlotLinked { node: id.index() });
            };
            if node.is_sentinel {
                return Err(InvariantViolation::CorruptSentinel);
            }

            match stage {
                Stage::Descend => {
                    stack.push((id, Stage::Visit)).map_err(|_| overflow(reachable))?;
                    if let Some(child) = self.checked_child(id, Side::Left)? {
                        stack.push((child, Stage::Descend)).map_err(|_| overflow(reachable))?;
                    }
                }

                Stage::Visit => {
                    if prev_key.is_some_and(|prev| prev >= key) {
                        return Err(InvariantViolation::OutOfOrder { node: id.index() });
                    }
                    prev_key = Some(key);
                    reachable += 1;

                    stack.push((id, Stage::Finish)).map_err(|_| overflow(reachable))?;
                    if let Some(child) = self.checked_child(id, Side::Right)? {
                        stack.push((child, Stage::Descend)).map_err(|_| overflow(reachable))?;
                    }
                }

                Stage::Finish => {
                    let [left, right] = [Side::Left, Side::Right].map(|side| {
                        let child = node.child(side);
                        if self.is_sentinel(child) {
                            1
                        } else {
                            heights[child.index()] + usize::from(self.color(child).is_black())
                        }
                    });
                    if left != right {
                        return Err(InvariantViolation::BlackHeightMismatch {
                            node: id.index(),
                            left,
                            right,
                        });
                    }
                    heights[id.index()] = left;
                }
            }
        }

        Ok((heights[root.index()], reachable))
    }

    /// The real child of `id` on `side`, after checking its back-link and
    /// the red-red rule. `None` for the sentinel.
    fn checked_child(&self, id: NodeId, side: Side) -> Result<Option<NodeId>, InvariantViolation> {
        let child = self.child(id, side);
        if self.is_sentinel(child) {
            return Ok(None);
        }
        if self.parent(child) != Some(id) {
            return Err(InvariantViolation::BrokenParentLink {
                node: child.index(),
            });
        }
        if self.is_red(id) && self.is_red(child) {
            return Err(InvariantViolation::RedRedEdge { node: id.index() });
        }
        Ok(Some(child))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Fail fast in tests")]
mod tests {
    use super::*;
    use crate::node::Color;

    fn tree_of(keys: &[u32]) -> RbTree<u32, ()> {
        let mut tree = RbTree::new();
        for &k in keys {
            tree.insert(k, ()).unwrap();
        }
        tree
    }

    fn id_of(tree: &RbTree<u32, ()>, key: u32) -> NodeId {
        match tree.search(&key) {
            super::super::Search::Found(id) => id,
            super::super::Search::Vacant { .. } => panic!("{key} missing"),
        }
    }

    #[test]
    fn test_valid_trees_pass() {
        assert_eq!(tree_of(&[]).check_invariants(), Ok(0));
        assert_eq!(tree_of(&[1]).check_invariants(), Ok(1));
        assert_eq!(tree_of(&[1, 2, 3, 4]).check_invariants(), Ok(2));
    }

    #[test]
    fn test_large_tree_walk_matches_black_height() {
        let keys: Vec<u32> = (0..50_000).collect();
        let tree = tree_of(&keys);

        assert_eq!(tree.check_invariants(), Ok(tree.black_height()));
    }

    #[test]
    fn test_detects_vacant_slot_linked() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = id_of(&tree, 1);
        tree.arena.node_mut(one).entry = None;

        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::VacantSlotLinked { node: one.index() })
        );
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree = tree_of(&[1, 2]);
        let root = tree.root.unwrap();
        tree.arena.node_mut(root).color = Color::Red;

        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn test_detects_red_red_edge() {
        let mut tree = tree_of(&[2, 1, 3, 4]);
        // 3 is black with red child 4
        let three = id_of(&tree, 3);
        tree.arena.node_mut(three).color = Color::Red;

        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::RedRedEdge { .. })
        ));
    }

    #[test]
    fn test_detects_black_height_mismatch() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = id_of(&tree, 1);
        tree.arena.node_mut(one).color = Color::Black;

        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::BlackHeightMismatch { left: 2, right: 1, .. })
        ));
    }

    #[test]
    fn test_detects_out_of_order_keys() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = id_of(&tree, 1);
        tree.arena.node_mut(one).entry = Some((5, ()));

        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = id_of(&tree, 1);
        let three = id_of(&tree, 3);
        tree.arena.node_mut(one).parent = Some(three);

        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::BrokenParentLink { node: one.index() })
        );
    }

    #[test]
    fn test_detects_corrupt_sentinel() {
        let mut tree = tree_of(&[1]);
        tree.arena.node_mut(NodeId::SENTINEL).color = Color::Red;

        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::CorruptSentinel)
        );
        tree.arena.node_mut(NodeId::SENTINEL).color = Color::Black;
    }

    #[test]
    fn test_detects_count_mismatch() {
        let mut tree = tree_of(&[1, 2]);
        tree.len = 3;

        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::CountMismatch {
                reachable: 2,
                recorded: 3,
                live: 2
            })
        );
        tree.len = 2;
    }
}
