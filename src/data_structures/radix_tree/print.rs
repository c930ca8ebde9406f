// Copyright (c) 2026 Aero Router Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Human-readable dump of a radix tree.
//!
//! The format is meant for debugging only and is not stable:
//!
//! ```text
//! /blog [true]
//! |_ /feed [true]
//!   |_ /atom [true]
//! |_ s [true]
//! ```

use std::fmt::{self, Write};

use super::node::Node;

/// Writes `root` and its subtree depth-first, one line per node.
///
/// The root is printed without indentation or branch marker.
pub(crate) fn write_node<V, W: Write>(out: &mut W, root: &Node<V>) -> fmt::Result {
    let mut stack = vec![(root, None)];

    while let Some((node, level)) = stack.pop() {
        if let Some(level) = level {
            write!(out, "{}|_ ", "  ".repeat(level))?;
        }
        writeln!(
            out,
            "{} [{}]",
            String::from_utf8_lossy(&node.prefix),
            node.value.is_some()
        )?;

        let next = level.map_or(0, |level: usize| level + 1);
        // Reversed so the smallest byte is printed first.
        stack.extend(node.children().rev().map(|(_, child)| (child, Some(next))));
    }
    Ok(())
}
