//! Route table built on the radix tree.
//!
//! Routes follow a build-then-serve lifecycle. A [`RouteTableBuilder`]
//! registers routes with exclusive access to the tree, and
//! [`RouteTableBuilder::build`] freezes it into a [`RouteTable`]: immutable,
//! cheap to clone, and safe to hand to any number of reader threads. The
//! serving layer receives the table explicitly; nothing here is global.
//!
//! When routes must be registered while requests are already being served,
//! [`SharedRouteTable`] puts the tree behind a read-write lock instead.

mod shared;
mod table;

pub use shared::SharedRouteTable;
pub use table::{RouteTable, RouteTableBuilder};

use serde::{Deserialize, Serialize};

use crate::error::routing::RoutingError;

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// Payload stored in the tree for each registered path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Exact request path, e.g. `/blog/feed`
    pub path: String,

    /// Name of the handler serving this path
    pub handler: String,

    /// Free-form description shown in diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Route {
    /// Creates a route without a description.
    pub fn new<P: Into<String>, H: Into<String>>(path: P, handler: H) -> Self {
        Self {
            path: path.into(),
            handler: handler.into(),
            description: None,
        }
    }

    /// Attaches a description to the route.
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}
