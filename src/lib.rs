//! `llrb_rank_map` is an ordered key-value map based on a left-leaning
//! red-black tree.
//!
//! It fully implements the insertion and deletion functionality of a
//! red-black tree, ensuring that each modification operation requires at
//! most O(logN) time complexity.
//!
//! Every node carries the size of its subtree, so the map also answers
//! order-statistic queries in O(logN) time: the rank of a key, the key at
//! a given rank, and the keys in a rank interval.
//!
//! # Example
//!
//! ```rust
//! use llrb_rank_map::RankMap;
//!
//! let mut map = RankMap::new();
//! map.insert(3, "c");
//! map.insert(1, "a");
//! map.insert(2, "b");
//! assert_eq!(map.get(&2), Some(&"b"));
//! assert_eq!(map.rank(&3), 2);
//! assert_eq!(map.get_by_rank(0), Some(&1));
//! ```
//!

#[cfg(feature = "graphviz")]
mod graphviz;
mod node;
mod rankmap;


pub use node::{Color, Node};
pub use rankmap::RankMap;
