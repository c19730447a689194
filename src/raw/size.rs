use super::handle::Handle;

/// The number of nodes in a subtree, including the subtree's root.
///
/// This is the augmentation that turns a plain BST into an order-statistics
/// tree: with per-node subtree sizes, rank queries descend in O(log n)
/// without a full traversal. Represented over [`Handle`] so the two share a
/// range (a tree can never hold more nodes than the arena can address) and
/// the niche optimization.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Verify our assumptions about `Size` and the niche optimization.
    assert_eq_size!(Size, Option<Size>);
    assert_eq_size!(Size, Handle);

    #[test]
    fn one() {
        assert_eq!(Size::ONE.to_usize(), 1);
    }

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn invalid_size() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    proptest! {
        #[test]
        fn size_round_trip(size in 0..=Size::MAX) {
            assert_eq!(Size::from_usize(size).to_usize(), size);
        }
    }
}
