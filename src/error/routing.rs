//! Routing error module.
//!
//! Errors raised by the route table layer that sits on top of the radix
//! tree. The tree itself never fails; these cover registration input and the
//! translation of a missing route into an error for callers that want one.

use thiserror::Error;

/// Errors that can occur while building or querying a route table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// A route was registered with an empty path.
    #[error("Route path cannot be empty")]
    EmptyPath,

    /// No route is registered under the requested path.
    #[error("No route registered for path: {0}")]
    NotFound(String),
}
