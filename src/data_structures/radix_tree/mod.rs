// Copyright (c) 2026 Aero Router Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Compressed prefix tree (radix tree) mapping byte-string keys to payloads.
//!
//! Keys are stored as edge-compressed segments: chains of single-child nodes
//! collapse into one node holding a multi-byte prefix, and a node is split
//! only when a new key diverges inside a stored prefix. Every node dispatches
//! to its children through a 256-slot table indexed by the next key byte, so
//! lookups cost O(key length) regardless of how many siblings a branch has.
//!
//! # Example
//!
//! ```
//! use aero_router_lib::data_structures::radix_tree::RadixTree;
//!
//! let mut tree = RadixTree::new();
//! tree.insert("/blog", "blog");
//! tree.insert("/blog/feed", "feed");
//! tree.insert("/blogs", "blogs");
//!
//! assert_eq!(tree.find("/blog/feed"), Some(&"feed"));
//! assert_eq!(tree.find("/blo"), None);
//! assert_eq!(tree.find("/blogging"), None);
//! ```
//!
//! # Lifecycle
//!
//! The tree follows a build-then-serve discipline. `insert` takes `&mut self`
//! and `find` takes `&self`, so once construction is finished the tree can
//! be shared (for example behind an `Arc`) with any number of concurrent
//! readers. Runtime registration alongside readers needs external locking;
//! see [`crate::routing::SharedRouteTable`].

mod node;
mod print;

#[cfg(test)]
mod tests;

use std::fmt;
use std::io;

use node::Node;

pub use node::DISPATCH_SLOTS;

/// Length of the common leading run of `a` and `b`.
#[inline]
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Shape summary of a tree, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of stored keys
    pub keys: usize,

    /// Number of nodes, including the root
    pub nodes: usize,

    /// Depth of the deepest node, the root being at depth 0
    pub max_depth: usize,
}

/// A radix tree keyed by byte strings.
///
/// The tree exclusively owns every node through its root; nodes are never
/// shared between parents and are released when the tree is dropped.
#[derive(Clone)]
pub struct RadixTree<V> {
    root: Node<V>,
    len: usize,
}

impl<V> RadixTree<V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Associates `value` with `path`.
    ///
    /// Inserting a key that is already present overwrites its payload in
    /// place without creating nodes.
    ///
    /// # Returns
    ///
    /// The payload previously stored under exactly `path`, if any.
    pub fn insert<K: AsRef<[u8]>>(&mut self, path: K, value: V) -> Option<V> {
        let mut rest = path.as_ref();
        let mut node = &mut self.root;

        loop {
            let matched = common_prefix_len(&node.prefix, rest);

            // The path ended inside this node's prefix or diverged from it.
            // node: /blog|feed    node: /b|ag
            // path: /blog|        path: /b|riefcase
            if matched < node.prefix.len() {
                node.split(matched, &rest[matched..], value);
                self.len += 1;
                return None;
            }

            rest = &rest[matched..];

            // node: /blog|
            // path: /blog|
            let Some(&byte) = rest.first() else {
                let previous = node.value.replace(value);
                if previous.is_none() {
                    self.len += 1;
                }
                return previous;
            };

            // First insertion into an empty tree.
            if node.is_unset() {
                node.prefix = rest.to_vec();
                node.value = Some(value);
                self.len += 1;
                return None;
            }

            // node: /|
            // path: /|blog
            let slot = &mut node.children[usize::from(byte)];
            node = match slot {
                Some(child) => &mut **child,
                None => {
                    *slot = Some(Box::new(Node::leaf(rest, value)));
                    self.len += 1;
                    return None;
                }
            };
        }
    }

    /// Returns the payload stored under exactly `path`.
    ///
    /// This is an exact-key lookup: a path that ends inside a stored
    /// prefix, or extends past a stored key, is not found.
    pub fn find<K: AsRef<[u8]>>(&self, path: K) -> Option<&V> {
        let mut rest = path.as_ref();
        let mut node = &self.root;

        loop {
            rest = rest.strip_prefix(node.prefix.as_slice())?;
            match rest.first() {
                None => return node.value.as_ref(),
                Some(&byte) => node = node.child(byte)?,
            }
        }
    }

    /// Returns `true` if a payload is stored under exactly `path`.
    pub fn contains_key<K: AsRef<[u8]>>(&self, path: K) -> bool {
        self.find(path).is_some()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes reachable from the root, the root included.
    pub fn node_count(&self) -> usize {
        self.stats().nodes
    }

    /// Walks the whole tree and summarizes its shape.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack = vec![(&self.root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(depth);
            if node.value.is_some() {
                stats.keys += 1;
            }
            stack.extend(node.children().map(|(_, child)| (child, depth + 1)));
        }

        stats
    }

    /// Iterates over all `(key, payload)` pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            stack: vec![(Vec::new(), &self.root)],
        }
    }

    /// Writes a human-readable dump of the tree to `writer`.
    ///
    /// One line per node, children in ascending byte order, each line
    /// showing the node's prefix and whether it carries a payload.
    pub fn pretty_print<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Display for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print::write_node(f, &self.root)
    }
}

impl<V: fmt::Debug> fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|(key, value)| (String::from_utf8_lossy(&key).into_owned(), value)),
            )
            .finish()
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for RadixTree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first iterator over the entries of a [`RadixTree`].
///
/// Created by [`RadixTree::iter`]. Keys are rebuilt by concatenating the
/// prefixes along the path from the root.
pub struct Iter<'a, V> {
    stack: Vec<(Vec<u8>, &'a Node<V>)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((mut key, node)) = self.stack.pop() {
            key.extend_from_slice(&node.prefix);
            // Reversed so the smallest byte is popped first.
            for (_, child) in node.children().rev() {
                self.stack.push((key.clone(), child));
            }
            if let Some(value) = node.value.as_ref() {
                return Some((key, value));
            }
        }
        None
    }
}
