//! An ordered bidirectional map built from two randomized treaps that share their nodes.
//!
//! Each pair `(L, R)` is stored once and linked into a treap ordered by `L` and a treap ordered
//! by `R`. Lookups, bounds, insertions, and removals work from either side in expected
//! `O(log N)` time, and a cursor into one ordering can be flipped into the other in `O(1)`.
//!
//! # Examples
//!
//! ```
//! use treap_bimap::Bimap;
//!
//! let mut map = Bimap::new();
//! map.insert("one", 1);
//! map.insert("two", 2);
//!
//! assert_eq!(map.get_left(&"two"), Some(&2));
//! assert_eq!(map.get_right(&1), Some(&"one"));
//!
//! let cursor = map.find_right(&2).flip();
//! assert_eq!(cursor.get(), Some(&"two"));
//! ```

pub mod arena;
pub mod bimap;
pub mod compare;

pub use crate::bimap::{Bimap, Error, Result};
