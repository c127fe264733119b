//! Persistent string-keyed map built on a hash-array mapped trie.
//!
//! Hash-Array Mapped Trie (HAMT) is a tree whose nodes are fixed-width arrays
//! indexed by hashes of keys. Every update of [`Dict`] copies only the path
//! from the root to the updated slot and shares everything else with the
//! original dictionary, which makes it suitable for immutable application
//! state whose snapshots are kept around and compared.
//!
//! ```
//! use hamt_dict::Dict;
//!
//! let dict = Dict::new().set("a", 1).set("b", 2);
//! let other = dict.set("a", 3).delete("b");
//!
//! assert_eq!(dict.get("a"), Some(&1));
//! assert_eq!(other.get("a"), Some(&3));
//! assert_eq!(other.get("b"), None);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` for [`Dict`] as a map with
//!   string keys. Its tests run only with the feature on, so test the crate
//!   with `cargo test --all-features`.

mod dict;
mod entry;
mod hash;
mod node;
#[cfg(test)]
mod proptests;
#[cfg(feature = "serde")]
mod serialization;

pub use dict::Dict;
pub use hash::hash;
pub use node::{ClonedNodeIterator as IntoIter, NodeIterator as Iter};

/// Default breadth of trie nodes.
pub const DEFAULT_BREADTH: usize = 32;
