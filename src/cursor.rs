//! A rank-indexed cursor over a tree's sorted sequence.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawRbst};

/// A positional view over a tree's elements in sorted order.
///
/// A cursor sits in a slot *between* elements: position `p` is before the
/// element of rank `p`, with valid positions spanning `[0, len]`. It moves
/// one element at a time in either direction and can be repositioned to an
/// arbitrary slot with [`seek`](Cursor::seek).
///
/// Resolving a rank to a node is an O(log n) descent, but each resolved node
/// is cached against its rank for the cursor's lifetime, so repeated and
/// adjacent traversal is amortized rather than paying a root-to-leaf walk per
/// step.
///
/// The cursor holds a shared borrow of its tree, so mutating the tree while a
/// cursor is alive is rejected at compile time; a stale cursor cannot be
/// constructed. There are no mutating operations: inserting, removing, or
/// replacing an element *at a position* would break the ordering invariant,
/// so the capability is not offered at all.
///
/// # Examples
///
/// ```
/// use rbst_tree::RandomizedTree;
///
/// let tree: RandomizedTree<i32> = [3, 1, 2].into();
/// let mut cursor = tree.iter();
///
/// assert_eq!(cursor.next_element(), Some(&1));
/// assert_eq!(cursor.next_element(), Some(&2));
/// assert_eq!(cursor.previous_element(), Some(&2));
/// assert_eq!(cursor.position(), 1);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Cursor<'a, E> {
    raw: &'a RawRbst<E>,
    /// Lazily-filled rank-to-node cache, one slot per element.
    resolved: Vec<Option<Handle>>,
    position: usize,
}

impl<'a, E> Cursor<'a, E> {
    pub(crate) fn new(raw: &'a RawRbst<E>, position: usize) -> Self {
        let len = raw.len();
        assert!(position <= len, "`Cursor::new()` - `position` is past the end of the tree!");
        Self {
            raw,
            resolved: vec![None; len],
            position,
        }
    }

    /// Returns the cursor's current slot position, in `[0, len]`.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns true if an element exists after the current position.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.position < self.resolved.len()
    }

    /// Returns true if an element exists before the current position.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Advances past the next element and returns it, or `None` at the end.
    pub fn next_element(&mut self) -> Option<&'a E> {
        if !self.has_next() {
            return None;
        }
        let handle = self.resolve(self.position);
        self.position += 1;
        Some(self.raw.element(handle))
    }

    /// Retreats before the previous element and returns it, or `None` at the
    /// start.
    pub fn previous_element(&mut self) -> Option<&'a E> {
        if !self.has_previous() {
            return None;
        }
        self.position -= 1;
        let handle = self.resolve(self.position);
        Some(self.raw.element(handle))
    }

    /// Moves the cursor to an arbitrary slot position.
    ///
    /// The cache of already-resolved nodes is kept; only the position moves.
    ///
    /// # Panics
    ///
    /// Panics if `position > len`.
    pub fn seek(&mut self, position: usize) {
        assert!(
            position <= self.resolved.len(),
            "`Cursor::seek()` - `position` is past the end of the tree!"
        );
        self.position = position;
    }

    /// Resolves a rank to its node, consulting the cache first.
    fn resolve(&mut self, rank: usize) -> Handle {
        if let Some(handle) = self.resolved[rank] {
            return handle;
        }
        let handle = self.raw.find_by_rank(rank).expect("`Cursor::resolve()` - `rank` is out of bounds!");
        self.resolved[rank] = Some(handle);
        handle
    }
}

impl<'a, E> Iterator for Cursor<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_element()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.resolved.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<E> ExactSizeIterator for Cursor<'_, E> {}

impl<E> FusedIterator for Cursor<'_, E> {}

impl<E> Clone for Cursor<'_, E> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            resolved: self.resolved.clone(),
            position: self.position,
        }
    }
}

impl<E> fmt::Debug for Cursor<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("len", &self.resolved.len())
            .finish()
    }
}
