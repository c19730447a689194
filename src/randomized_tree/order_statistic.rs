use core::ops::Index;

use super::RandomizedTree;
use crate::Rank;
use crate::policy::Comparator;

impl<E, C, R> RandomizedTree<E, C, R> {
    /// Returns the element at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is outside
    /// `[0, len)`.
    ///
    /// # Complexity
    ///
    /// O(log n) expected.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbst_tree::RandomizedTree;
    ///
    /// let tree: RandomizedTree<i32> = [30, 10, 20].into();
    /// assert_eq!(tree.get_by_rank(1), Some(&20));
    /// assert!(tree.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&E> {
        self.raw.find_by_rank(rank).map(|handle| self.raw.element(handle))
    }

    /// Returns the smallest element, or `None` if the tree is empty.
    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.get_by_rank(0)
    }

    /// Returns the largest element, or `None` if the tree is empty.
    #[must_use]
    pub fn last(&self) -> Option<&E> {
        self.len().checked_sub(1).and_then(|rank| self.get_by_rank(rank))
    }
}

impl<E, C: Comparator<E>, R> RandomizedTree<E, C, R> {
    /// Returns the zero-based rank of `element` in sorted order, or `None`
    /// if no equal-comparing element is present.
    ///
    /// When duplicates are allowed and several elements compare equal to
    /// `element`, the returned rank is some valid position within the equal
    /// run - not necessarily the first.
    ///
    /// # Complexity
    ///
    /// O(log n) expected.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbst_tree::RandomizedTree;
    ///
    /// let tree: RandomizedTree<i32> = [10, 20].into();
    ///
    /// assert_eq!(tree.rank_of(&20), Some(1));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, element: &E) -> Option<usize> {
        self.raw.rank_of(element, &self.comparator)
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rbst_tree::{RandomizedTree, Rank};
///
/// let tree: RandomizedTree<i32> = [30, 10, 20].into();
/// assert_eq!(tree[Rank(1)], 20);
/// ```
impl<E, C, R> Index<Rank> for RandomizedTree<E, C, R> {
    type Output = E;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
