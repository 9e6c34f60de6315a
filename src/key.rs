//! Key validation for [`RbTree`](crate::RbTree).
//!
//! Keys need a total order (`Ord`) and a validity check. String-like keys
//! reject the empty string; numeric keys accept every value.

/// A key type accepted by the tree.
///
/// Implementors must keep `Ord` consistent with equality: two keys comparing
/// `Equal` are the same key, and the tree stores at most one of them.
///
/// # Example
///
/// ```rust
/// use rbtree::key::TreeKey;
///
/// assert!("a".is_valid_key());
/// assert!(!"".is_valid_key());
/// assert!(0_u64.is_valid_key());
/// ```
pub trait TreeKey: Ord {
    /// Whether this key may be inserted or looked up.
    ///
    /// Invalid keys are rejected with
    /// [`TreeError::InvalidArgument`](crate::TreeError::InvalidArgument).
    fn is_valid_key(&self) -> bool {
        true
    }
}

impl TreeKey for str {
    #[inline]
    fn is_valid_key(&self) -> bool {
        !self.is_empty()
    }
}

impl TreeKey for String {
    #[inline]
    fn is_valid_key(&self) -> bool {
        !self.is_empty()
    }
}

impl TreeKey for [u8] {
    #[inline]
    fn is_valid_key(&self) -> bool {
        !self.is_empty()
    }
}

impl TreeKey for Vec<u8> {
    #[inline]
    fn is_valid_key(&self) -> bool {
        !self.is_empty()
    }
}

impl<const N: usize> TreeKey for [u8; N] {
    #[inline]
    fn is_valid_key(&self) -> bool {
        N > 0
    }
}

impl<T: TreeKey + ?Sized> TreeKey for &T {
    #[inline]
    fn is_valid_key(&self) -> bool {
        (**self).is_valid_key()
    }
}

impl<T: TreeKey + ?Sized> TreeKey for Box<T> {
    #[inline]
    fn is_valid_key(&self) -> bool {
        (**self).is_valid_key()
    }
}

macro_rules! always_valid {
    ($($ty:ty),* $(,)?) => {
        $(impl TreeKey for $ty {})*
    };
}

always_valid!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool,
);
