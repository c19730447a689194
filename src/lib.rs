//! Randomized binary search tree (RBST) collections for Rust.
//!
//! This crate provides [`RandomizedTree`], an ordered multiset with O(log n)
//! expected-time search, insertion, deletion, and order-statistic operations:
//!
//! - [`get_by_rank`](RandomizedTree::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](RandomizedTree::rank_of) - Get the sorted position of an element
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest element
//!
//! The tree stores no balance metadata at all - no heights, no colors. Balance
//! comes from random structural choices made during insertion and deletion, as
//! described by Martínez and Roura (Journal of the ACM, Vol. 45, No. 2, March
//! 1998, pp. 288-323). After any sequence of insertions and deletions, every
//! tree shape consistent with the stored keys is equally likely; in particular
//! each of the `n` stored keys is the root with probability `1/n`, independent
//! of insertion order.
//!
//! # Example
//!
//! ```
//! use rbst_tree::{RandomizedTree, Rank};
//!
//! let mut tree = RandomizedTree::new();
//! tree.insert(5);
//! tree.insert(1);
//! tree.insert(3);
//!
//! // Ordered-collection operations.
//! assert!(tree.contains(&3));
//! assert_eq!(tree.len(), 3);
//!
//! // Order-statistic operations (O(log n) expected).
//! assert_eq!(tree.get_by_rank(0), Some(&1));
//! assert_eq!(tree.rank_of(&5), Some(2));
//! assert_eq!(tree[Rank(1)], 3);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No balance metadata** - Randomization replaces heights, colors, and weights
//! - **O(log n) rank operations** - Order-statistic queries via subtree size augmentation
//! - **Configurable ordering** - Natural `Ord` ordering or an injected [`Comparator`]
//! - **Duplicates policy** - Set-like or multiset behavior, fixed at construction
//!
//! # Implementation
//!
//! Nodes live in a contiguous arena and carry only an element, a subtree size,
//! and two child handles. Insertion randomly pushes visited nodes toward the
//! leaves ("push-down") and deletion merges the removed node's subtrees with a
//! size-weighted coin ("join"); both draw from a caller-injectable uniform
//! generator, so tests can substitute a seeded source.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod order_statistic;
mod raw;

pub mod cursor;
pub mod policy;
pub mod randomized_tree;

pub use cursor::Cursor;
pub use order_statistic::Rank;
pub use policy::{Comparator, Duplicates, Natural};
pub use randomized_tree::RandomizedTree;
