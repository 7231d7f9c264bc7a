//! A library containing an implementation of a Ternary Search Tree.
//!
//! A ternary search tree stores string-keyed values in a tree whose nodes
//! each hold a single character and three children: keys whose current
//! character sorts below the node's character continue in the `low` child,
//! keys sorting above it continue in the `high` child, and keys matching it
//! advance to their next character in the `eq` child. A stored key is spelled
//! by the characters along the `eq` transitions of its path.
//!
//! Beyond exact lookup, the shape of the tree supports richer queries over
//! the key set: prefix completion, near-neighbor search under a substitution
//! budget, and crossword-style wildcard matching.
//!
//! ```
//! use tstree::Tst;
//!
//! let mut map = Tst::new();
//! for (rank, word) in ["FROM", "FORM", "FORD", "FOR", "FOUR"].into_iter().enumerate() {
//!     map.insert(word, rank).unwrap();
//! }
//!
//! // Enumerations come out in key order.
//! let words: Vec<&str> = map.keys();
//! assert_eq!(words, ["FOR", "FORD", "FORM", "FOUR", "FROM"]);
//!
//! // `.` matches exactly one character, `*` any run of characters.
//! let hits = map.partial_key_search("F..M");
//! let hits: Vec<&str> = hits.into_iter().map(|(word, _)| word).collect();
//! assert_eq!(hits, ["FORM", "FROM"]);
//! ```

#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::all,
    missing_debug_implementations
)]
#![deny(clippy::all, missing_docs, rust_2018_idioms, rust_2021_compatibility)]

mod error;
mod key;
mod map;
mod node;
mod search;
mod tree;

#[cfg(test)]
mod proptests;

pub use error::{InsertError, Result};
pub use key::StringKey;
pub use map::TstMap;
pub use tree::Tst;
