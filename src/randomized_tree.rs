//! An ordered multiset backed by a randomized binary search tree.

use alloc::vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::cursor::Cursor;
use crate::policy::{Comparator, Duplicates, Natural};
use crate::raw::RawRbst;

mod order_statistic;

/// An ordered collection based on a randomized binary search tree.
///
/// Elements are kept in sorted order under a [`Comparator`] fixed at
/// construction ([`Natural`] by default), with a [`Duplicates`] policy
/// controlling whether equal-comparing elements may coexist. Search,
/// insertion, deletion, and rank operations all take O(log n) expected time;
/// the worst case is O(n) with vanishing probability, regardless of the
/// order elements arrive in.
///
/// Instead of balance metadata, the tree re-balances through random choices
/// drawn from a uniform generator. The generator is part of the type
/// (`SmallRng` seeded from the operating system by default) and can be
/// injected through [`with_rng`](RandomizedTree::with_rng) to make shapes
/// reproducible in tests.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element changes while it is in the tree.
/// This is normally only possible through `Cell`, `RefCell`, global state,
/// I/O, or an inconsistent [`Comparator`]. The behavior resulting from such
/// a logic error may include panics and incorrect results, but never
/// undefined behavior.
///
/// The tree provides no internal locking and is not safe for concurrent
/// mutation; wrap it in external synchronization if multiple threads need
/// access.
///
/// # Examples
///
/// ```
/// use rbst_tree::{Duplicates, RandomizedTree};
///
/// let mut tree = RandomizedTree::new();
///
/// assert!(tree.insert(5));
/// assert!(tree.insert(3));
/// assert!(!tree.insert(5)); // duplicates are rejected by default
///
/// assert_eq!(tree.len(), 2);
/// assert!(tree.contains(&3));
/// assert!(tree.remove(&3));
/// assert!(!tree.remove(&3));
///
/// // Multiset behavior is opt-in.
/// let mut bag = RandomizedTree::with_duplicates(Duplicates::Allow);
/// bag.insert(2);
/// bag.insert(2);
/// assert_eq!(bag.len(), 2);
/// ```
pub struct RandomizedTree<E, C = Natural, R = SmallRng> {
    raw: RawRbst<E>,
    comparator: C,
    duplicates: Duplicates,
    rng: R,
}

impl<E: Ord> RandomizedTree<E> {
    /// Creates an empty tree with natural ordering that rejects duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbst_tree::RandomizedTree;
    ///
    /// let tree: RandomizedTree<i32> = RandomizedTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_duplicates(Duplicates::Reject)
    }

    /// Creates an empty tree with natural ordering and the given duplicates
    /// policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbst_tree::{Duplicates, RandomizedTree};
    ///
    /// let mut bag = RandomizedTree::with_duplicates(Duplicates::Allow);
    /// bag.insert("a");
    /// bag.insert("a");
    /// assert_eq!(bag.len(), 2);
    /// ```
    #[must_use]
    pub fn with_duplicates(duplicates: Duplicates) -> Self {
        Self::with_comparator(Natural, duplicates)
    }
}

impl<E, C: Comparator<E>> RandomizedTree<E, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// Both policies are fixed for the tree's lifetime; changing either
    /// mid-life would invalidate the ordering invariant of the nodes already
    /// stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbst_tree::{Duplicates, RandomizedTree};
    ///
    /// let mut tree =
    ///     RandomizedTree::with_comparator(|a: &i32, b: &i32| b.cmp(a), Duplicates::Reject);
    /// tree.extend([1, 2, 3]);
    /// assert_eq!(tree.first(), Some(&3));
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: C, duplicates: Duplicates) -> Self {
        Self::with_rng(comparator, duplicates, SmallRng::from_os_rng())
    }
}

impl<E, C: Comparator<E>, R: Rng> RandomizedTree<E, C, R> {
    /// Creates an empty tree with every policy supplied by the caller,
    /// including the uniform generator that drives re-balancing.
    ///
    /// Injecting a seeded generator makes tree shapes - though never the
    /// element sequence - reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    /// use rbst_tree::{Duplicates, Natural, RandomizedTree};
    ///
    /// let rng = SmallRng::seed_from_u64(42);
    /// let mut tree = RandomizedTree::with_rng(Natural, Duplicates::Reject, rng);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[must_use]
    pub fn with_rng(comparator: C, duplicates: Duplicates, rng: R) -> Self {
        Self {
            raw: RawRbst::new(),
            comparator,
            duplicates,
            rng,
        }
    }
}

impl<E, C, R> RandomizedTree<E, C, R> {
    /// Returns the number of elements in the tree.
    ///
    /// # Complexity
    ///
    /// O(1) - the root node carries the total size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the tree contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes all elements, resetting to the empty tree.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the ordering policy in effect.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the duplicates policy in effect.
    #[must_use]
    pub const fn duplicates(&self) -> Duplicates {
        self.duplicates
    }

    /// Returns a cursor positioned before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbst_tree::RandomizedTree;
    ///
    /// let tree: RandomizedTree<i32> = [2, 1, 3].into();
    /// let elements: Vec<i32> = tree.iter().copied().collect();
    /// assert_eq!(elements, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Cursor<'_, E> {
        Cursor::new(&self.raw, 0)
    }

    /// Returns a cursor positioned before the element of rank `rank`.
    ///
    /// A `rank` equal to `len` yields a cursor past the last element, useful
    /// for walking backward.
    ///
    /// # Panics
    ///
    /// Panics if `rank > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbst_tree::RandomizedTree;
    ///
    /// let tree: RandomizedTree<i32> = [10, 20, 30].into();
    /// let mut cursor = tree.iter_from(tree.len());
    /// assert_eq!(cursor.previous_element(), Some(&30));
    /// ```
    pub fn iter_from(&self, rank: usize) -> Cursor<'_, E> {
        Cursor::new(&self.raw, rank)
    }
}

impl<E, C: Comparator<E>, R> RandomizedTree<E, C, R> {
    /// Returns true if an element comparing equal to `element` is present.
    ///
    /// # Complexity
    ///
    /// O(log n) expected.
    #[must_use]
    pub fn contains(&self, element: &E) -> bool {
        self.raw.rank_of(element, &self.comparator).is_some()
    }
}

impl<E, C: Comparator<E>, R: Rng> RandomizedTree<E, C, R> {
    /// Inserts `element` at a random depth consistent with the ordering.
    ///
    /// Returns `false` - leaving the length unchanged - when the element
    /// compares equal to one already present and the tree rejects
    /// duplicates. The tree may still be restructured in that case: the
    /// matching node is randomly pushed toward the leaves so repeated probes
    /// of the same key cannot bias the shape.
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
    /// let mut tree = RandomizedTree::new();
    /// assert!(tree.insert(7));
    /// assert!(!tree.insert(7));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, element: E) -> bool {
        self.raw.insert(element, &self.comparator, self.duplicates, &mut self.rng)
    }

    /// Removes one element comparing equal to `element`.
    ///
    /// Returns `false` if no such element was present. When duplicates are
    /// allowed and several equal elements exist, exactly one is removed.
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
    /// let mut tree: RandomizedTree<i32> = [1, 2].into();
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove(&mut self, element: &E) -> bool {
        self.raw.remove(element, &self.comparator, &mut self.rng)
    }

    /// Retains only the elements for which the predicate returns true.
    ///
    /// The surviving elements are re-inserted from scratch, so the resulting
    /// shape is freshly randomized.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbst_tree::RandomizedTree;
    ///
    /// let mut tree: RandomizedTree<i32> = (1..=6).collect();
    /// tree.retain(|element| element % 2 == 0);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [2, 4, 6]);
    /// ```
    pub fn retain<F: FnMut(&E) -> bool>(&mut self, mut predicate: F) {
        for element in self.raw.drain_in_order() {
            if predicate(&element) {
                self.raw.insert(element, &self.comparator, self.duplicates, &mut self.rng);
            }
        }
    }
}

impl<E: Ord> Default for RandomizedTree<E> {
    fn default() -> Self {
        RandomizedTree::new()
    }
}

impl<E: fmt::Debug, C, R> fmt::Debug for RandomizedTree<E, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Trees are equal iff they have the same length and elementwise-equal
/// sequences in iteration order; policies and shape do not participate.
impl<E: PartialEq, C, R> PartialEq for RandomizedTree<E, C, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<E: Eq, C, R> Eq for RandomizedTree<E, C, R> {}

/// Hashes the length and the ordered sequence of elements, so equal trees
/// hash identically regardless of shape.
impl<E: Hash, C, R> Hash for RandomizedTree<E, C, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self.iter() {
            element.hash(state);
        }
    }
}

/// Cloning rebuilds an independent tree by re-inserting every element: the
/// copy shares no nodes with the original and its shape is re-randomized,
/// preserving only the element multiset and the policies.
impl<E, C, R> Clone for RandomizedTree<E, C, R>
where
    E: Clone,
    C: Comparator<E> + Clone,
    R: Rng + Clone,
{
    fn clone(&self) -> Self {
        let mut copy = Self::with_rng(self.comparator.clone(), self.duplicates, self.rng.clone());
        for element in self.iter() {
            copy.insert(element.clone());
        }
        copy
    }
}

impl<E, C: Comparator<E>, R: Rng> Extend<E> for RandomizedTree<E, C, R> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, E: 'a + Copy, C: Comparator<E>, R: Rng> Extend<&'a E> for RandomizedTree<E, C, R> {
    fn extend<I: IntoIterator<Item = &'a E>>(&mut self, iter: I) {
        for &element in iter {
            self.insert(element);
        }
    }
}

impl<E: Ord> FromIterator<E> for RandomizedTree<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = RandomizedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<E: Ord, const N: usize> From<[E; N]> for RandomizedTree<E> {
    /// ```
    /// use rbst_tree::RandomizedTree;
    ///
    /// let tree = RandomizedTree::from([3, 1, 2]);
    /// assert_eq!(tree.get_by_rank(0), Some(&1));
    /// ```
    fn from(elements: [E; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<'a, E, C, R> IntoIterator for &'a RandomizedTree<E, C, R> {
    type Item = &'a E;
    type IntoIter = Cursor<'a, E>;

    fn into_iter(self) -> Cursor<'a, E> {
        self.iter()
    }
}

impl<E, C, R> IntoIterator for RandomizedTree<E, C, R> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    /// Consumes the tree, yielding its elements in ascending order.
    fn into_iter(mut self) -> IntoIter<E> {
        IntoIter {
            inner: self.raw.drain_in_order().into_iter(),
        }
    }
}

/// An owning iterator over a tree's elements in ascending order.
///
/// Created by the [`into_iter`](RandomizedTree#method.into_iter) method on
/// [`RandomizedTree`] via the [`IntoIterator`] trait.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<E> {
    inner: vec::IntoIter<E>,
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> DoubleEndedIterator for IntoIter<E> {
    fn next_back(&mut self) -> Option<E> {
        self.inner.next_back()
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}

impl<E> core::iter::FusedIterator for IntoIter<E> {}

impl<E: fmt::Debug> fmt::Debug for IntoIter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
