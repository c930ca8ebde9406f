//! Aero router library.
//!
//! A compressed prefix tree that maps URL paths to route handlers, plus the
//! configuration and route-table layers used to build it once at startup and
//! serve lookups from it afterwards.
//!
//! # Architecture
//!
//! - [`data_structures::radix_tree`]: the tree itself (insert, exact-key
//!   find, diagnostic dump)
//! - [`routing`]: build-then-serve route tables on top of the tree
//! - [`config`]: layered configuration, including the route list
//! - [`error`]: error types for the layers around the tree

pub mod config;
pub mod data_structures;
pub mod error;
pub mod routing;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Aero router.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
