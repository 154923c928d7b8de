// Route Prefetcher
// "Warm the code before the user commits to the navigation"

pub mod triggers;


use std::sync::Arc;

use anyhow::Result;
use dashmap::DashSet;
use futures_util::future::{join_all, BoxFuture};
use tracing::{debug, warn};

/// Zero-argument loader that resolves once a route's module is available.
/// The resolved value is irrelevant to prefetching and is swallowed.
pub type ModuleLoader = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Declarative route: normalized path plus its lazy module loader.
/// Built once at application startup; immutable for the process lifetime.
#[derive(Clone)]
pub struct RouteEntry {
    path: String,
    load: ModuleLoader,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, load: ModuleLoader) -> Self {
        Self {
            path: normalize(&path.into()),
            load,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry").field("path", &self.path).finish()
    }
}

/// Ordered, immutable route table with exact-match lookup by normalized path.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteEntry>) -> Self {
        Self { routes }
    }

    pub fn find(&self, normalized: &str) -> Option<&RouteEntry> {
        self.routes.iter().find(|route| route.path == normalized)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Canonicalize a path for registry membership and route lookup.
///
/// Empty becomes `/`, a single leading slash is ensured, and everything from
/// the first `?` or `#` onward is stripped. Two inputs that normalize
/// identically are the same route.
pub fn normalize(path: &str) -> String {
    let path = if path.is_empty() { "/" } else { path };
    let with_slash = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let end = with_slash
        .find(['?', '#'])
        .unwrap_or(with_slash.len());
    with_slash[..end].to_string()
}

/// Prefetches route modules ahead of navigation.
///
/// The registry of already-dispatched paths is owned per instance so tests
/// can run isolated registries; it grows monotonically and is never cleared
/// for the life of the instance. A given normalized path runs its loader at
/// most once, no matter how many elements reference it.
pub struct Prefetcher {
    table: Arc<RouteTable>,
    registry: DashSet<String>,
}

impl Prefetcher {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            registry: DashSet::new(),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Whether a path's loader has already been dispatched this session.
    pub fn is_prefetched(&self, path: &str) -> bool {
        self.registry.contains(&normalize(path))
    }

    /// Prefetch the module for `path`.
    ///
    /// Already-dispatched and unknown paths resolve immediately as no-ops.
    /// The registry is marked before the load settles, so concurrent calls
    /// during the in-flight window dedupe against dispatch, not completion.
    /// A rejected loader propagates to this caller only and does not un-mark
    /// the entry: a failed prefetch counts as attempted, not reattempted.
    pub async fn prefetch(&self, path: &str) -> Result<()> {
        let path = normalize(path);
        if self.registry.contains(&path) {
            return Ok(());
        }

        let Some(route) = self.table.find(&path) else {
            // Unknown paths are not errors and leave no registry mark.
            return Ok(());
        };

        if !self.registry.insert(path.clone()) {
            // Lost the race to a same-tick caller that already dispatched.
            return Ok(());
        }

        debug!(%path, "prefetching route module");
        (route.load)().await
    }

    /// Prefetch every declared route concurrently.
    ///
    /// Resolve-only: individual loader failures are logged and dropped, they
    /// never fail the aggregate.
    pub async fn prefetch_all(&self) {
        let loads = self.table.paths().map(|path| {
            let path = path.to_string();
            async move {
                if let Err(err) = self.prefetch(&path).await {
                    warn!(%path, error = %err, "route prefetch failed");
                }
            }
        });
        join_all(loads).await;
    }
}
