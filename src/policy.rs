//! Construction-time policies: element ordering and duplicate handling.
//!
//! Both policies are fixed when a tree is created and consulted by every core
//! operation. Changing either mid-life would invalidate the ordering invariant
//! of the existing tree, so neither is exposed mutably.

use core::cmp::Ordering;

/// A total ordering over elements of type `E`.
///
/// This is the injection point for custom orderings. The default policy is
/// [`Natural`], which delegates to [`Ord`]; any `Fn(&E, &E) -> Ordering`
/// closure or function also implements this trait, so a custom ordering can
/// be supplied without a dedicated type:
///
/// ```
/// use core::cmp::Ordering;
/// use rbst_tree::{Duplicates, RandomizedTree};
///
/// // Largest-first ordering.
/// let mut tree =
///     RandomizedTree::with_comparator(|a: &i32, b: &i32| b.cmp(a), Duplicates::Reject);
/// tree.insert(1);
/// tree.insert(3);
/// tree.insert(2);
/// assert_eq!(tree.get_by_rank(0), Some(&3));
/// ```
///
/// Implementations must be total and consistent: for any `a`, `b`, `c`,
/// exactly one of `Less`/`Equal`/`Greater` holds, and the usual transitivity
/// rules apply. An inconsistent comparator will not cause memory unsafety but
/// makes lookup results unspecified.
pub trait Comparator<E> {
    /// Compares two elements, returning their relative order.
    fn compare(&self, first: &E, second: &E) -> Ordering;
}

impl<E, F> Comparator<E> for F
where
    F: Fn(&E, &E) -> Ordering,
{
    fn compare(&self, first: &E, second: &E) -> Ordering {
        self(first, second)
    }
}

/// The natural ordering policy, delegating to the element's [`Ord`] instance.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<E: Ord> Comparator<E> for Natural {
    fn compare(&self, first: &E, second: &E) -> Ordering {
        first.cmp(second)
    }
}

/// Whether equal-comparing elements may coexist in a tree.
///
/// With [`Duplicates::Reject`] the tree behaves like a set: inserting an
/// element that already has an equal in the tree is a no-op reported as
/// `false`. With [`Duplicates::Allow`] it behaves like a multiset: every
/// insertion adds a node and equal elements form a run in iteration order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Duplicates {
    /// Equal-comparing elements may not coexist; the tree is a set.
    #[default]
    Reject,
    /// Equal-comparing elements may coexist; the tree is a multiset.
    Allow,
}

impl Duplicates {
    /// Returns true if equal-comparing elements may coexist.
    #[must_use]
    pub const fn allowed(self) -> bool {
        matches!(self, Duplicates::Allow)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn natural_matches_ord() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare(&2, &2), Ordering::Equal);
        assert_eq!(Natural.compare(&3, &2), Ordering::Greater);
    }

    #[test]
    fn closures_are_comparators() {
        let reversed = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
    }

    #[test]
    fn duplicates_default_rejects() {
        assert_eq!(Duplicates::default(), Duplicates::Reject);
        assert!(!Duplicates::Reject.allowed());
        assert!(Duplicates::Allow.allowed());
    }
}
