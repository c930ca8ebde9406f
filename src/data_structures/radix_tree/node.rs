// Copyright (c) 2026 Aero Router Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Node implementation for the radix tree.
//!
//! A node owns one compressed segment of a key, an optional payload, and a
//! 256-slot dispatch table of children indexed by the first byte of each
//! child's segment.

use std::fmt;

/// Number of slots in a node's dispatch table, one per byte value.
pub const DISPATCH_SLOTS: usize = 256;

/// Byte-indexed child table. Each slot exclusively owns at most one child.
pub(crate) type Children<V> = Box<[Option<Box<Node<V>>>; DISPATCH_SLOTS]>;

fn empty_children<V>() -> Children<V> {
    Box::new(std::array::from_fn(|_| None))
}

/// A node in the radix tree.
pub(crate) struct Node<V> {
    /// Segment of the key owned by this node
    pub(crate) prefix: Vec<u8>,

    /// Payload of the key that ends exactly at this node
    pub(crate) value: Option<V>,

    /// Children keyed by the first byte of their prefix
    pub(crate) children: Children<V>,
}

impl<V> Node<V> {
    /// Creates the unset root node: empty prefix, no value, no children.
    pub(crate) fn new() -> Self {
        Self {
            prefix: Vec::new(),
            value: None,
            children: empty_children(),
        }
    }

    /// Creates a leaf holding `prefix` and `value`.
    pub(crate) fn leaf(prefix: &[u8], value: V) -> Self {
        Self {
            prefix: prefix.to_vec(),
            value: Some(value),
            children: empty_children(),
        }
    }

    /// Returns `true` for a node that has never stored anything.
    ///
    /// Only the root of an empty tree is in this state.
    pub(crate) fn is_unset(&self) -> bool {
        self.prefix.is_empty() && self.value.is_none() && !self.has_children()
    }

    pub(crate) fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    /// Returns the child whose prefix starts with `byte`.
    #[inline]
    pub(crate) fn child(&self, byte: u8) -> Option<&Node<V>> {
        self.children[usize::from(byte)].as_deref()
    }

    /// Iterates over the occupied slots in ascending byte order.
    pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = (u8, &Node<V>)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(slot, child)| child.as_deref().map(|node| (slot as u8, node)))
    }

    /// Installs `child` in the slot named by the first byte of its prefix.
    fn attach(&mut self, child: Node<V>) {
        let slot = usize::from(child.prefix[0]);
        debug_assert!(
            self.children[slot].is_none(),
            "dispatch slot {slot:#04x} is already occupied"
        );
        self.children[slot] = Some(Box::new(child));
    }

    /// Splits this node after `index` bytes of its prefix.
    ///
    /// The cut-off tail moves into a new child together with this node's
    /// value and every existing child. When `remainder` is empty this node
    /// takes `value`; otherwise it becomes a pure branch point and `value`
    /// lives in a second new leaf holding `remainder`.
    pub(crate) fn split(&mut self, index: usize, remainder: &[u8], value: V) {
        debug_assert!(
            index < self.prefix.len(),
            "split index {index} must fall inside a prefix of {} bytes",
            self.prefix.len()
        );
        debug_assert!(
            remainder.first() != self.prefix.get(index),
            "remainder must diverge from the prefix at the split point"
        );

        let tail = Node {
            prefix: self.prefix.split_off(index),
            value: self.value.take(),
            children: std::mem::replace(&mut self.children, empty_children()),
        };

        // The tail took every child, so the two slots below cannot collide
        // with anything left behind.
        debug_assert!(!self.has_children());
        self.attach(tail);

        if remainder.is_empty() {
            self.value = Some(value);
        } else {
            self.attach(Node::leaf(remainder, value));
        }
    }
}

impl<V: Clone> Node<V> {
    /// Copies the prefix and value, leaving the dispatch table empty.
    fn detached(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            value: self.value.clone(),
            children: empty_children(),
        }
    }
}

// Deep chains of nested keys must not recurse once per level, so clone and
// drop walk the subtree with an explicit stack.
impl<V: Clone> Clone for Node<V> {
    fn clone(&self) -> Self {
        // (source, next slot to visit, copy under construction)
        let mut stack = vec![(self, 0usize, self.detached())];
        loop {
            let top = stack.len() - 1;
            let (source, cursor) = (stack[top].0, stack[top].1);

            match source.children[cursor..].iter().position(Option::is_some) {
                Some(offset) => {
                    let slot = cursor + offset;
                    stack[top].1 = slot + 1;
                    if let Some(child) = source.children[slot].as_deref() {
                        stack.push((child, 0, child.detached()));
                    }
                }
                None => {
                    let (_, _, copy) = stack.swap_remove(top);
                    match stack.last_mut() {
                        Some((_, _, parent)) => parent.attach(copy),
                        None => return copy,
                    }
                }
            }
        }
    }
}

impl<V> Drop for Node<V> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<V>>> =
            self.children.iter_mut().filter_map(Option::take).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.iter_mut().filter_map(Option::take));
        }
    }
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("value", &self.value)
            .field(
                "children",
                &self
                    .children()
                    .map(|(slot, _)| char::from(slot))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
