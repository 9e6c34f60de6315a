//! `SharedTree` - an [`RbTree`] behind a mutex.
//!
//! Every operation takes the lock for its whole duration, so callers see the
//! tree move between valid states only. The tree itself is untouched by
//! this wrapper; it only serializes access.

use std::borrow::Borrow;
use std::fmt as StdFmt;

use parking_lot::{Mutex, MutexGuard};

use super::RbTree;
use crate::TreeError;
use crate::key::TreeKey;

/// A red-black tree shareable across threads by reference.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use rbtree::SharedTree;
///
/// let tree: Arc<SharedTree<u64, u64>> = Arc::new(SharedTree::new());
///
/// let handles: Vec<_> = (0..4_u64)
///     .map(|t| {
///         let tree = Arc::clone(&tree);
///         thread::spawn(move || tree.insert(t, t * 10).unwrap())
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(tree.len(), 4);
/// assert_eq!(tree.find(&2), Some(20));
/// ```
pub struct SharedTree<K, V> {
    inner: Mutex<RbTree<K, V>>,
}

impl<K, V> SharedTree<K, V> {
    /// Create an empty shared tree.
    #[must_use]
    pub fn new() -> Self {
        Self::from_tree(RbTree::new())
    }

    /// Create an empty shared tree with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_tree(RbTree::with_capacity(capacity))
    }

    /// Wrap an existing tree.
    #[must_use]
    pub fn from_tree(tree: RbTree<K, V>) -> Self {
        Self {
            inner: Mutex::new(tree),
        }
    }

    /// Number of entries at the moment of the call.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the tree was empty at the moment of the call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with shared access to the tree, holding the lock throughout.
    pub fn with<R>(&self, f: impl FnOnce(&RbTree<K, V>) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Run `f` with exclusive access to the tree, holding the lock
    /// throughout. Use this to make several operations atomic.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut RbTree<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Take the lock and hold it until the guard drops.
    pub fn lock(&self) -> MutexGuard<'_, RbTree<K, V>> {
        self.inner.lock()
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// See [`RbTree::clear`].
    pub fn clear(&self) -> Result<usize, TreeError> {
        self.inner.lock().clear()
    }

    /// Unwrap the tree.
    #[must_use]
    pub fn into_inner(self) -> RbTree<K, V> {
        self.inner.into_inner()
    }
}

impl<K: TreeKey, V> SharedTree<K, V> {
    /// Insert a new entry.
    ///
    /// # Errors
    ///
    /// See [`RbTree::insert`].
    pub fn insert(&self, key: K, value: V) -> Result<(), TreeError> {
        self.inner.lock().insert(key, value)
    }
}

impl<K: Ord, V> SharedTree<K, V> {
    /// Remove `key` and return its value.
    ///
    /// # Errors
    ///
    /// See [`RbTree::delete`].
    pub fn delete<Q>(&self, key: &Q) -> Result<V, TreeError>
    where
        K: Borrow<Q>,
        Q: TreeKey + ?Sized,
    {
        self.inner.lock().delete(key)
    }

    /// Clone out the value stored under `key`.
    ///
    /// The lock is released before returning, so the value is a snapshot.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone,
    {
        self.inner.lock().find(key).cloned()
    }

    /// Whether `key` is stored.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.lock().contains_key(key)
    }
}

impl<K, V> Default for SharedTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> From<RbTree<K, V>> for SharedTree<K, V> {
    fn from(tree: RbTree<K, V>) -> Self {
        Self::from_tree(tree)
    }
}

impl<K: StdFmt::Debug, V: StdFmt::Debug> StdFmt::Debug for SharedTree<K, V> {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self.inner.try_lock() {
            Some(tree) => f.debug_tuple("SharedTree").field(&*tree).finish(),
            None => f.write_str("SharedTree(<locked>)"),
        }
    }
}
