//! Bounded LIFO stack used by traversal and teardown.
//!
//! Capacity is fixed at construction. Pushing past it fails with
//! [`StackFull`] instead of growing, so a traversal sized from the tree's
//! count can never allocate more than it asked for.

use std::fmt as StdFmt;

/// Returned by [`BoundedStack::push`] when the stack is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFull {
    /// Capacity of the stack that rejected the push.
    pub capacity: usize,
}

impl StdFmt::Display for StackFull {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        write!(f, "stack full (capacity {})", self.capacity)
    }
}

impl std::error::Error for StackFull {}

/// A fixed-capacity stack.
///
/// # Example
///
/// ```rust
/// use rbtree::stack::BoundedStack;
///
/// let mut stack = BoundedStack::with_capacity(2);
/// stack.push(1).unwrap();
/// stack.push(2).unwrap();
/// assert!(stack.push(3).is_err());
///
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.peek(), Some(&1));
/// ```
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Create an empty stack holding at most `capacity` items.
    ///
    /// The backing storage is allocated up front.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push an item.
    ///
    /// # Errors
    ///
    /// [`StackFull`] if the stack already holds `capacity` items. The item is
    /// dropped.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), StackFull> {
        if self.items.len() >= self.capacity {
            return Err(StackFull {
                capacity: self.capacity,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Pop the most recently pushed item.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Borrow the most recently pushed item.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Number of items currently held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack holds no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every item, keeping the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
