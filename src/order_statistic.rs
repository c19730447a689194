/// A zero-based rank into the sorted order of a tree.
///
/// Wrapping the rank in a newtype keeps positional indexing visually distinct
/// from slice indexing at call sites.
///
/// # Examples
///
/// ```
/// use rbst_tree::{RandomizedTree, Rank};
///
/// let mut tree = RandomizedTree::new();
/// tree.insert(20);
/// tree.insert(10);
///
/// assert_eq!(tree[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
