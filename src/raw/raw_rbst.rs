use alloc::vec::Vec;
use core::cmp::Ordering;

use rand::Rng;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use super::size::Size;
use crate::policy::{Comparator, Duplicates};

/// The randomized BST core backing `RandomizedTree`.
///
/// Holds only the arena and the root; the ordering policy, duplicates policy,
/// and random generator are owned by the wrapper and passed into each
/// operation, keeping the core free of policy state.
///
/// The randomization scheme follows Martínez and Roura: insertion pushes
/// visited nodes down with a size-weighted coin so no insertion pattern can
/// percolate one node to the root and keep it there, and deletion joins the
/// removed node's subtrees choosing the new root in proportion to subtree
/// size. Together these keep every shape consistent with the key set equally
/// likely.
pub(crate) struct RawRbst<E> {
    nodes: Arena<Node<E>>,
    root: Option<Handle>,
}

impl<E> RawRbst<E> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) fn len(&self) -> usize {
        self.subtree_size(self.root)
    }

    /// Returns true if the tree contains no elements.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the element stored at `handle`.
    #[inline]
    pub(crate) fn element(&self, handle: Handle) -> &E {
        self.nodes.get(handle).element()
    }

    /// Returns the size of the subtree rooted at `tree`, zero for an empty
    /// subtree.
    #[inline]
    fn subtree_size(&self, tree: Option<Handle>) -> usize {
        tree.map_or(0, |handle| self.nodes.get(handle).size().to_usize())
    }

    /// Re-establishes `size == 1 + size(left) + size(right)` at `handle`.
    fn refresh_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let total = 1 + self.subtree_size(left) + self.subtree_size(right);
        self.nodes.get_mut(handle).set_size(Size::from_usize(total));
    }

    /// Reattaches the left child of `handle` and refreshes its size.
    ///
    /// All structural changes go through this and [`Self::attach_right`] so a
    /// node's size is never stale when the next operation observes it.
    fn attach_left(&mut self, handle: Handle, child: Option<Handle>) {
        self.nodes.get_mut(handle).set_left(child);
        self.refresh_size(handle);
    }

    /// Reattaches the right child of `handle` and refreshes its size.
    fn attach_right(&mut self, handle: Handle, child: Option<Handle>) {
        self.nodes.get_mut(handle).set_right(child);
        self.refresh_size(handle);
    }

    /// Finds the node holding the element with the given zero-based rank, or
    /// `None` if `rank >= len`.
    ///
    /// Descends comparing the rank against the left subtree size: smaller
    /// recurses left, larger recurses right with the rank reduced by
    /// `left_size + 1`, equal stops at the current node.
    pub(crate) fn find_by_rank(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut rank = rank;
        loop {
            let node = self.nodes.get(current);
            let left_size = self.subtree_size(node.left());
            match rank.cmp(&left_size) {
                Ordering::Less => {
                    current = node.left().expect("`RawRbst::find_by_rank()` - size invariant violated!");
                }
                Ordering::Greater => {
                    rank -= left_size + 1;
                    current = node.right().expect("`RawRbst::find_by_rank()` - size invariant violated!");
                }
                Ordering::Equal => return Some(current),
            }
        }
    }

    /// Returns the zero-based rank of `element` in sorted order, or `None` if
    /// no equal-comparing element is present.
    ///
    /// A running rank is maintained while descending: it starts at the root's
    /// left subtree size, drops by `1 + size(right-of-child)` when moving
    /// left, and grows by `1 + size(left-of-child)` when moving right. When
    /// duplicates are allowed this lands on whichever node of the equal run
    /// the comparisons reach first.
    pub(crate) fn rank_of<C: Comparator<E>>(&self, element: &E, comparator: &C) -> Option<usize> {
        let mut current = self.root?;
        let mut rank = self.subtree_size(self.nodes.get(current).left());
        loop {
            let node = self.nodes.get(current);
            match comparator.compare(element, node.element()) {
                Ordering::Equal => return Some(rank),
                Ordering::Less => {
                    current = node.left()?;
                    rank -= 1 + self.subtree_size(self.nodes.get(current).right());
                }
                Ordering::Greater => {
                    current = node.right()?;
                    rank += 1 + self.subtree_size(self.nodes.get(current).left());
                }
            }
        }
    }

    /// Inserts `element` at a random depth consistent with the ordering.
    ///
    /// Returns `false` when the element was discarded as a duplicate under
    /// [`Duplicates::Reject`]; the tree may still have been restructured.
    pub(crate) fn insert<C, R>(&mut self, element: E, comparator: &C, duplicates: Duplicates, rng: &mut R) -> bool
    where
        C: Comparator<E>,
        R: Rng,
    {
        let before = self.len();
        let root = self.root;
        self.root = Some(self.insert_node(root, element, comparator, duplicates, rng));
        self.len() > before
    }

    /// Recursive insertion step; returns the subtree's (possibly new) root.
    fn insert_node<C, R>(&mut self, tree: Option<Handle>, element: E, comparator: &C, duplicates: Duplicates, rng: &mut R) -> Handle
    where
        C: Comparator<E>,
        R: Rng,
    {
        let Some(mut tree) = tree else {
            return self.nodes.alloc(Node::new(element));
        };

        let node = self.nodes.get(tree);
        let (left, right) = (node.left(), node.right());
        let size = node.size().to_usize();
        let imbalance = self.subtree_size(left).abs_diff(self.subtree_size(right));

        // One draw over [0, size): with probability imbalance / size the
        // subtree root is pushed down before the descent continues. This is
        // what keeps e.g. strictly increasing insertions from building a
        // chain.
        if rng.random_range(0..size) < imbalance {
            tree = self.push_down(tree, rng);
        }

        let order = comparator.compare(&element, self.nodes.get(tree).element());
        match order {
            Ordering::Equal if !duplicates.allowed() => {
                // A matching node already exists. Push it further down so the
                // shape stays random despite the repeated probe, and drop the
                // new element; the caller sees an unchanged size.
                tree = self.push_down(tree, rng);
            }
            Ordering::Less => {
                let left = self.nodes.get(tree).left();
                let new_left = self.insert_node(left, element, comparator, duplicates, rng);
                self.attach_left(tree, Some(new_left));
            }
            // Greater, or equal with duplicates allowed: equal elements go
            // right, so an equal run is contiguous in order.
            Ordering::Greater | Ordering::Equal => {
                let right = self.nodes.get(tree).right();
                let new_right = self.insert_node(right, element, comparator, duplicates, rng);
                self.attach_right(tree, Some(new_right));
            }
        }

        tree
    }

    /// Randomly demotes the root of the subtree at `tree` toward the leaves,
    /// returning the subtree's new root.
    ///
    /// A single three-way draw over `[0, total)` where
    /// `total = left_size + right_size + 1`: rotate down-right with
    /// probability `left_size / total`, down-left with
    /// `right_size / total`, stay with `1 / total`. The draw is repeated
    /// fresh at every level of the recursion.
    fn push_down<R: Rng>(&mut self, tree: Handle, rng: &mut R) -> Handle {
        let node = self.nodes.get(tree);
        let (left, right) = (node.left(), node.right());
        let left_size = self.subtree_size(left);
        let right_size = self.subtree_size(right);
        let total = left_size + right_size + 1;

        let draw = rng.random_range(0..total);
        if draw < left_size {
            // Rotate down-right: promote the left child and keep demoting the
            // old root inside the promoted child's right subtree.
            let new_root = left.expect("`RawRbst::push_down()` - size invariant violated!");
            let transfer = self.nodes.get(new_root).right();
            self.attach_left(tree, transfer);
            let demoted = self.push_down(tree, rng);
            self.attach_right(new_root, Some(demoted));
            new_root
        } else if draw < left_size + right_size {
            // Rotate down-left, symmetrically.
            let new_root = right.expect("`RawRbst::push_down()` - size invariant violated!");
            let transfer = self.nodes.get(new_root).left();
            self.attach_right(tree, transfer);
            let demoted = self.push_down(tree, rng);
            self.attach_left(new_root, Some(demoted));
            new_root
        } else {
            // Stay put.
            tree
        }
    }

    /// Removes one element comparing equal to `element`, returning `false`
    /// if none was present.
    pub(crate) fn remove<C, R>(&mut self, element: &E, comparator: &C, rng: &mut R) -> bool
    where
        C: Comparator<E>,
        R: Rng,
    {
        let before = self.len();
        let root = self.root;
        self.root = self.delete_node(root, element, comparator, rng);
        self.len() < before
    }

    /// Recursive deletion step; returns the subtree's (possibly new) root.
    fn delete_node<C, R>(&mut self, tree: Option<Handle>, element: &E, comparator: &C, rng: &mut R) -> Option<Handle>
    where
        C: Comparator<E>,
        R: Rng,
    {
        let tree = tree?;
        let node = self.nodes.get(tree);
        let (left, right) = (node.left(), node.right());
        let order = comparator.compare(element, node.element());

        match order {
            Ordering::Equal => {
                // Found it: free the node and join its two subtrees.
                drop(self.nodes.take(tree));
                self.join(left, right, rng)
            }
            Ordering::Less => {
                let new_left = self.delete_node(left, element, comparator, rng);
                self.attach_left(tree, new_left);
                Some(tree)
            }
            Ordering::Greater => {
                let new_right = self.delete_node(right, element, comparator, rng);
                self.attach_right(tree, new_right);
                Some(tree)
            }
        }
    }

    /// Joins two subtrees where every element of `left` compares less than
    /// every element of `right`, returning the combined subtree.
    ///
    /// The combined root is the left operand's root with probability
    /// `left_size / (left_size + right_size)`, else the right operand's; the
    /// unchosen side is then joined recursively into the chosen root's inner
    /// branch. This is the deletion-side counterpart of push-down and keeps
    /// post-deletion shapes uniformly random.
    fn join<R: Rng>(&mut self, left: Option<Handle>, right: Option<Handle>, rng: &mut R) -> Option<Handle> {
        let (Some(left), Some(right)) = (left, right) else {
            return left.or(right);
        };

        let left_size = self.subtree_size(Some(left));
        let right_size = self.subtree_size(Some(right));
        let total = left_size + right_size;

        if rng.random_range(0..total) < left_size {
            // Keep the left root: join its right branch with the right
            // subtree.
            let branch = self.nodes.get(left).right();
            let joined = self.join(branch, Some(right), rng);
            self.attach_right(left, joined);
            Some(left)
        } else {
            // Keep the right root: join the left subtree with its left
            // branch.
            let branch = self.nodes.get(right).left();
            let joined = self.join(Some(left), branch, rng);
            self.attach_left(right, joined);
            Some(right)
        }
    }

    /// Returns the handles of all nodes in ascending element order.
    pub(crate) fn in_order_handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.len());
        let mut stack: Vec<Handle> = Vec::new();
        let mut current = self.root;

        while current.is_some() || !stack.is_empty() {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left();
            }
            let Some(handle) = stack.pop() else { break };
            handles.push(handle);
            current = self.nodes.get(handle).right();
        }

        handles
    }

    /// Empties the tree, returning its elements in ascending order.
    pub(crate) fn drain_in_order(&mut self) -> Vec<E> {
        let handles = self.in_order_handles();
        let mut elements = Vec::with_capacity(handles.len());
        for handle in handles {
            elements.push(self.nodes.take(handle).into_element());
        }
        self.root = None;
        self.nodes.clear();
        elements
    }
}

#[cfg(test)]
impl<E> RawRbst<E> {
    /// Recursively checks the size and ordering invariants of the whole tree.
    pub(crate) fn assert_invariants<C: Comparator<E>>(&self, comparator: &C, duplicates: Duplicates) {
        self.check_sizes(self.root);

        let handles = self.in_order_handles();
        assert_eq!(handles.len(), self.len(), "in-order traversal length disagrees with root size");
        for pair in handles.windows(2) {
            let order = comparator.compare(self.element(pair[0]), self.element(pair[1]));
            match duplicates {
                Duplicates::Allow => assert_ne!(order, Ordering::Greater, "in-order traversal is not non-decreasing"),
                Duplicates::Reject => assert_eq!(order, Ordering::Less, "in-order traversal is not strictly increasing"),
            }
        }
    }

    /// Returns the root's element, if any.
    pub(crate) fn root_element(&self) -> Option<&E> {
        self.root.map(|handle| self.element(handle))
    }

    fn check_sizes(&self, tree: Option<Handle>) -> usize {
        let Some(handle) = tree else { return 0 };
        let node = self.nodes.get(handle);
        let expected = 1 + self.check_sizes(node.left()) + self.check_sizes(node.right());
        assert_eq!(node.size().to_usize(), expected, "node size disagrees with its subtrees");
        expected
    }
}
