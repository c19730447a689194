use super::handle::Handle;
use super::size::Size;

/// A single tree node: an element, a subtree size, and two owned children.
///
/// There are no parent links and no balance metadata. The size field must
/// satisfy `size == 1 + size(left) + size(right)` after every structural
/// change; [`super::RawRbst`] re-establishes it whenever a child is
/// reattached.
pub(crate) struct Node<E> {
    element: E,
    size: Size,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<E> Node<E> {
    pub(crate) const fn new(element: E) -> Self {
        Self {
            element,
            size: Size::ONE,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn element(&self) -> &E {
        &self.element
    }

    pub(crate) fn into_element(self) -> E {
        self.element
    }

    #[inline]
    pub(crate) const fn size(&self) -> Size {
        self.size
    }

    pub(crate) const fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    /// Reattaches the left child without refreshing `size`; the tree-level
    /// setter is responsible for the size invariant.
    pub(crate) const fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    /// Reattaches the right child without refreshing `size`; the tree-level
    /// setter is responsible for the size invariant.
    pub(crate) const fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use static_assertions::assert_eq_size;

    // Under `cfg(test)` handles are u16, so element + size + both
    // niche-optimized child handles pack into two words.
    assert_eq_size!(Node<u64>, [u64; 2]);

    #[test]
    fn fresh_node_is_a_leaf() {
        let node = Node::new('a');
        assert_eq!(*node.element(), 'a');
        assert_eq!(node.size().to_usize(), 1);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }
}
