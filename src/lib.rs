//! # Thicket: Ordered Search Structures
//!
//! This crate provides a pair of ordered, mutable search structures over
//! comparable keys, each keeping insert, delete, and search logarithmic by a
//! different mechanism:
//!
//! - [`ScapegoatTree`] - a weight-balanced binary search tree that never
//!   rotates. It tolerates bounded imbalance, and when an insertion lands
//!   too deep it finds the *scapegoat* ancestor whose subtree broke the
//!   weight-balance criterion and rebuilds that whole subtree perfectly
//!   balanced, in time linear in its size. A high-water mark on the size
//!   drives an occasional full rebuild after deletions; together the two
//!   triggers give amortized O(log n) updates and a hard height bound for
//!   searches at all times.
//!
//! - [`SkipList`] - a probabilistic multi-level linked list. Every node
//!   draws a level from a truncated geometric distribution and carries that
//!   many forward links; an *active level ceiling* trails the ideal level
//!   count for the current size, rising by activating forward capacity
//!   nodes already own (latent levels) and falling as a pure bound change.
//!
//! The two structures share no state or code and are consumed identically
//! by the line-command interpreter in [`repl`]:
//!
//! ```text
//!              ┌──────────────┐     I/D/S lines      ┌─────────────┐
//!   stdin ────►│  repl driver ├──────────┬──────────►│ S / F - ... │───► stdout
//!              └──────────────┘          │           └─────────────┘
//!                      ▲        ┌────────┴────────┐
//!                      │        ▼                 ▼
//!                 final dump  ScapegoatTree    SkipList
//!                 (print)     (ordered set)   (ordered map)
//! ```
//!
//! ## Result Semantics
//!
//! All recoverable outcomes are plain return values:
//!
//! | operation           | tree                      | list                        |
//! |---------------------|---------------------------|-----------------------------|
//! | insert existing key | `false` (rejected)        | `Some(old)` (value replaced)|
//! | remove missing key  | `false`                   | `None`                      |
//! | search miss         | `None`                    | `None`                      |
//!
//! The only error type is [`ConfigError`], raised at construction for a
//! balance factor outside (0.5, 1) or a promotion probability outside
//! (0, 1).
//!
//! ## Instrumentation
//!
//! Both structures count search comparisons (and the tree counts its
//! reconstructions) for the analysis driver; the counters are observational
//! only and never feed back into the algorithms.
//!
//! ## Basic Usage
//!
//! ```
//! use thicket::{ScapegoatTree, SkipList};
//!
//! let mut tree = ScapegoatTree::new();
//! for key in [5, 3, 8, 1] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
//!
//! let mut list: SkipList<i64, &str> = SkipList::new(32);
//! assert_eq!(list.insert(1, "one"), None);
//! assert_eq!(list.insert(1, "uno"), Some("one"));
//! assert_eq!(list.get(&1), Some(&"uno"));
//! ```
//!
//! ## Thread Safety
//!
//! Neither structure is thread-safe: every operation is synchronous, runs
//! to completion, and assumes exclusive access. Wrap an instance in a lock
//! if it must be shared; nothing inside will do it for you.

pub mod error;
pub mod iter;
pub mod print;
pub mod repl;
pub mod scapegoat;
pub mod skiplist;

pub use error::ConfigError;
pub use scapegoat::ScapegoatTree;
pub use skiplist::SkipList;
