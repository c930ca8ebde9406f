//! Data structures for the Aero router.

pub mod radix_tree;

pub use radix_tree::{RadixTree, TreeStats};
