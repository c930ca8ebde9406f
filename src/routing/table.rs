//! Build-phase builder and frozen serve-phase route table.

use std::io;
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use super::{Route, RoutingResult};
use crate::config::RouterConfig;
use crate::data_structures::radix_tree::{RadixTree, TreeStats};
use crate::error::routing::RoutingError;

/// Inserts `route` under its path, returning the route it replaced.
pub(super) fn register(tree: &mut RadixTree<Route>, route: Route) -> RoutingResult<Option<Route>> {
    if route.path.is_empty() {
        return Err(RoutingError::EmptyPath);
    }

    debug!(path = %route.path, handler = %route.handler, "Registering route");
    let previous = tree.insert(route.path.clone(), route);
    if let Some(previous) = &previous {
        warn!(
            path = %previous.path,
            handler = %previous.handler,
            "Route registered twice, keeping the later handler"
        );
    }
    Ok(previous)
}

/// Collects routes during the build phase.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    tree: RadixTree<Route>,
}

impl RouteTableBuilder {
    /// Creates a builder with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `path`, consuming and returning the builder.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::EmptyPath`] if `path` is empty.
    pub fn route<P: Into<String>, H: Into<String>>(
        mut self,
        path: P,
        handler: H,
    ) -> RoutingResult<Self> {
        self.add(Route::new(path, handler))?;
        Ok(self)
    }

    /// Registers `route`, overwriting any route with the same path.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(route))` - the route previously registered under that path
    /// * `Ok(None)` - the path was new
    /// * `Err(RoutingError::EmptyPath)` - the route has an empty path
    pub fn add(&mut self, route: Route) -> RoutingResult<Option<Route>> {
        register(&mut self.tree, route)
    }

    /// Number of distinct paths registered so far.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Ends the build phase.
    pub fn build(self) -> RouteTable {
        RouteTable::from_tree(self.tree)
    }
}

/// Frozen route table for the serve phase.
///
/// Cloning shares the underlying tree. Lookups never allocate or mutate, so
/// clones can be resolved from any number of threads at once.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub(super) tree: Arc<RadixTree<Route>>,
}

impl RouteTable {
    /// Starts a new build phase.
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    pub(super) fn from_tree(tree: RadixTree<Route>) -> Self {
        let TreeStats {
            keys,
            nodes,
            max_depth,
        } = tree.stats();
        info!(routes = keys, nodes, max_depth, "Route table built");

        Self {
            tree: Arc::new(tree),
        }
    }

    /// Builds a table by replaying the configured routes in order.
    ///
    /// # Errors
    ///
    /// Returns the first registration error, if any.
    pub fn from_config(config: &RouterConfig) -> RoutingResult<Self> {
        let mut builder = Self::builder();
        for route in &config.routes {
            builder.add(route.clone())?;
        }
        Ok(builder.build())
    }

    /// Returns the route registered under exactly `path`.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.tree.find(path)
    }

    /// Like [`resolve`](Self::resolve), but reports a missing route as
    /// [`RoutingError::NotFound`].
    pub fn resolve_or_err(&self, path: &str) -> RoutingResult<&Route> {
        self.resolve(path)
            .ok_or_else(|| RoutingError::NotFound(path.to_string()))
    }

    /// Resolves every path in `paths`, spreading the work over up to
    /// `readers` scoped threads. Results keep the order of `paths`.
    pub fn resolve_batch<P>(&self, paths: &[P], readers: usize) -> Vec<Option<&Route>>
    where
        P: AsRef<str> + Sync,
    {
        if paths.is_empty() {
            return Vec::new();
        }

        let readers = readers.clamp(1, paths.len());
        let chunk_size = paths.len().div_ceil(readers);
        debug!(paths = paths.len(), readers, "Resolving batch");

        thread::scope(|scope| {
            let handles: Vec<_> = paths
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|path| self.resolve(path.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }

    /// Number of registered paths.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Iterates over the routes in ascending path order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.tree.iter().map(|(_, route)| route)
    }

    /// The underlying tree, for diagnostics.
    pub fn tree(&self) -> &RadixTree<Route> {
        &self.tree
    }

    /// Writes the tree dump to `writer`.
    pub fn pretty_print<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.tree.pretty_print(writer)
    }
}
