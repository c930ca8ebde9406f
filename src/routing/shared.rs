//! Route table that accepts registrations while serving.

use std::sync::Arc;

use parking_lot::RwLock;

use super::table::{register, RouteTable};
use super::{Route, RoutingResult};
use crate::data_structures::radix_tree::RadixTree;

/// Route table guarded by a read-write lock.
///
/// The radix tree does no internal synchronization, so registering a route
/// while other threads resolve requires exclusive access. Writers take the
/// lock for the duration of one insert; readers share it and receive cloned
/// routes so no guard escapes.
#[derive(Debug, Clone, Default)]
pub struct SharedRouteTable {
    tree: Arc<RwLock<RadixTree<Route>>>,
}

impl SharedRouteTable {
    /// Creates an empty shared table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `route`, returning the route it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::EmptyPath`](crate::error::routing::RoutingError::EmptyPath)
    /// if the route has an empty path.
    pub fn register(&self, route: Route) -> RoutingResult<Option<Route>> {
        let mut tree = self.tree.write();
        register(&mut tree, route)
    }

    /// Returns a copy of the route registered under exactly `path`.
    pub fn resolve(&self, path: &str) -> Option<Route> {
        self.tree.read().find(path).cloned()
    }

    /// Number of registered paths.
    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    /// Returns `true` if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    /// Copies the current routes into a frozen [`RouteTable`].
    pub fn snapshot(&self) -> RouteTable {
        RouteTable::from_tree(self.tree.read().clone())
    }
}

impl From<RouteTable> for SharedRouteTable {
    fn from(table: RouteTable) -> Self {
        let tree = Arc::try_unwrap(table.tree).unwrap_or_else(|shared| (*shared).clone());
        Self {
            tree: Arc::new(RwLock::new(tree)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::routing::RoutingError;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_register_and_resolve() {
        let table = SharedRouteTable::new();
        assert!(table.is_empty());

        assert_eq!(table.register(Route::new("/a", "a")), Ok(None));
        assert_eq!(
            table.register(Route::new("", "root")),
            Err(RoutingError::EmptyPath)
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("/a"), Some(Route::new("/a", "a")));
        assert_eq!(table.resolve("/b"), None);
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let table = SharedRouteTable::new();
        table.register(Route::new("/a", "a")).unwrap();

        let snapshot = table.snapshot();
        table.register(Route::new("/b", "b")).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.resolve("/b").is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_frozen_table() {
        let frozen = RouteTable::builder().route("/a", "a").unwrap().build();
        let kept = frozen.clone();

        let shared = SharedRouteTable::from(frozen);
        shared.register(Route::new("/b", "b")).unwrap();

        assert_eq!(shared.len(), 2);
        assert_eq!(kept.len(), 1);
    }

    /// Writers and readers interleave through the lock without losing routes.
    #[test]
    fn test_concurrent_registration() {
        const WRITERS: usize = 4;
        const READERS: usize = 4;
        const ROUTES_PER_WRITER: usize = 100;

        let table = SharedRouteTable::new();
        let barrier = Arc::new(Barrier::new(WRITERS + READERS));

        let mut handles = Vec::new();
        for writer in 0..WRITERS {
            let table = table.clone();
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                for i in 0..ROUTES_PER_WRITER {
                    let path = format!("/w{writer}/r{i}");
                    table
                        .register(Route::new(path, format!("h{writer}_{i}")))
                        .unwrap();
                }
            }));
        }
        for _ in 0..READERS {
            let table = table.clone();
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                for i in 0..ROUTES_PER_WRITER {
                    if let Some(route) = table.resolve(&format!("/w0/r{i}")) {
                        assert_eq!(route.handler, format!("h0_{i}"));
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), WRITERS * ROUTES_PER_WRITER);
        for writer in 0..WRITERS {
            for i in 0..ROUTES_PER_WRITER {
                assert!(table.resolve(&format!("/w{writer}/r{i}")).is_some());
            }
        }
    }
}
