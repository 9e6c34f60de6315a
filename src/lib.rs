//! # `rbtree`
//!
//! An ordered map backed by a red-black tree whose nodes live in an arena.
//!
//! - Unique keys: inserting a key that is already present fails with
//!   [`TreeError::AlreadyExists`] and leaves the stored value in place.
//! - Every empty child link points at one sentinel node per tree, which is
//!   always black. Rebalancing never needs a missing-child special case.
//! - Parent links are plain slot indices, so the tree is `Send + Sync`
//!   whenever its keys and values are, with no unsafe code.
//! - Traversal and teardown never recurse. Both run on
//!   [`BoundedStack`](stack::BoundedStack)s sized from the tree's length.
//!
//! ## Example
//!
//! ```rust
//! use rbtree::{RbTree, TreeError};
//!
//! let mut tree = RbTree::new();
//! for (i, word) in ["pear", "apple", "fig"].into_iter().enumerate() {
//!     tree.insert(word, i).unwrap();
//! }
//!
//! assert_eq!(tree.find("fig"), Some(&2));
//! assert_eq!(tree.insert("", 9), Err(TreeError::InvalidArgument));
//! assert_eq!(tree.delete("apple"), Ok(1));
//! assert_eq!(tree.delete("apple"), Err(TreeError::NotFound));
//!
//! let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, ["fig", "pear"]);
//! tree.check_invariants().unwrap();
//! ```
//!
//! ## Thread Safety
//!
//! [`RbTree`] itself is unsynchronized: reads take `&self`, writes take
//! `&mut self`. [`SharedTree`] wraps one in a `parking_lot` mutex for
//! callers that share a tree across threads.
//!
//! ## Key Constraints
//!
//! Keys implement [`TreeKey`]. Empty strings and empty byte strings are
//! rejected with [`TreeError::InvalidArgument`]; numeric keys are always
//! valid.
//!
//! ## Logging
//!
//! With the `tracing` feature enabled, operations emit `tracing` events
//! (`debug` per mutation, `trace` per rebalancing step). Without it the
//! logging macros compile to nothing.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Node accessors are tiny and on every rebalancing path.
#![allow(clippy::inline_always)]

pub mod alloc;
mod error;
pub mod key;
pub mod node;
pub mod stack;
mod tracing_helpers;
pub mod tree;

// Re-export main types for convenience
pub use alloc::ArenaAllocator;
pub use error::{InvariantViolation, TreeError};
pub use key::TreeKey;
pub use node::Color;
pub use stack::{BoundedStack, StackFull};
pub use tree::{Iter, RbTree, SharedTree};
