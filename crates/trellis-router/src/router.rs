//! The router session.
//!
//! A [`Router`] owns the decorated tree, the navigation history and the
//! mounted route instances. Every navigation renders the tree, follows
//! redirects until the location settles, and unmounts instances that are
//! no longer rendered.

use std::fmt;
use std::sync::Arc;

use trellis_core::{Hook, Location, RenderProps, Result, Route, RouteKey, RouterError};
use trellis_lifecycle::{GateRegistry, GateState, Settlement};
use trellis_observability::{
    log_route_tree, LogSink, NavigationId, StderrSink, StructuredLogger,
};

use crate::config::RouterConfig;
use crate::decorate::decorate;
use crate::history::MemoryHistory;
use crate::host::Host;
use crate::render::{PassOutcome, RenderPass};
use crate::tree::RouteTree;

/// A routing session over one route configuration.
pub struct Router<H: Host> {
    config: RouterConfig,
    host: H,
    routes: Vec<Route<H::View>>,
    tree: Option<RouteTree<H::View>>,
    history: MemoryHistory,
    gates: GateRegistry,
    on_update: Option<Hook>,
    view: Option<H::View>,
    sink: Arc<dyn LogSink>,
}

impl<H: Host> Router<H> {
    /// Create a router with the default configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration cannot be decorated.
    pub fn new(routes: impl IntoIterator<Item = Route<H::View>>, host: H) -> Result<Self> {
        Self::with_config(routes, host, RouterConfig::default())
    }

    /// Create a router with an explicit configuration.
    pub fn with_config(
        routes: impl IntoIterator<Item = Route<H::View>>,
        host: H,
        config: RouterConfig,
    ) -> Result<Self> {
        let mut router = Self {
            history: MemoryHistory::new(config.base_path.as_str()),
            config,
            host,
            routes: Vec::new(),
            tree: None,
            gates: GateRegistry::new(),
            on_update: None,
            view: None,
            sink: Arc::new(StderrSink),
        };
        router.set_routes(routes)?;
        Ok(router)
    }

    /// Send router logs to `sink`.
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Call `hook` every time a content route renders its primary content.
    pub fn on_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RenderProps) + Send + Sync + 'static,
    {
        self.on_update = Some(Arc::new(hook));
        self
    }

    /// Replace the route configuration.
    ///
    /// Mounted instances whose keys survive the change stay mounted on the
    /// next render.
    pub fn set_routes(&mut self, routes: impl IntoIterator<Item = Route<H::View>>) -> Result<()> {
        let routes: Vec<Route<H::View>> = routes.into_iter().collect();
        let tree = decorate(&routes, &self.config.base_path, &self.config.default_redirect)?;

        if self.config.debug {
            if let Some(tree) = &tree {
                log_route_tree(&self.logger(), tree.to_debug_json());
            }
        }

        self.routes = routes;
        self.tree = tree;
        Ok(())
    }

    fn logger(&self) -> StructuredLogger {
        StructuredLogger::new(NavigationId::next())
            .with_location(self.history.location().to_string())
            .with_min_level(self.config.log_level)
            .with_format(self.config.log_format)
            .with_sink(Arc::clone(&self.sink))
    }

    /// Push `to` onto the history and render.
    ///
    /// # Errors
    ///
    /// [`RouterError::RedirectLoop`] if redirects do not settle within
    /// `max_redirects` hops.
    pub fn navigate(&mut self, to: impl Into<Location>) -> Result<&H::View> {
        let to = to.into();
        self.history.push(to);
        self.render()
    }

    /// Replace the current history entry with `to` and render.
    pub fn replace(&mut self, to: impl Into<Location>) -> Result<&H::View> {
        self.history.replace(to);
        self.render()
    }

    /// Go back one history entry and render. Stays put at the first entry.
    pub fn back(&mut self) -> Result<&H::View> {
        self.history.back();
        self.render()
    }

    /// Go forward one history entry and render.
    pub fn forward(&mut self) -> Result<&H::View> {
        self.history.forward();
        self.render()
    }

    /// Render the current location, following redirects until it settles.
    pub fn render(&mut self) -> Result<&H::View> {
        let logger = self.logger();
        logger.debug("render");

        let mut hops = 0;
        loop {
            let outcome = self.pass();

            let target = match outcome.redirect {
                Some(target) if target != *self.history.location() => target,
                _ => return Ok(self.view.insert(outcome.view)),
            };

            hops += 1;
            if hops > self.config.max_redirects {
                logger
                    .warn_builder("redirect loop")
                    .field("to", target.to_string())
                    .field_i64("hops", hops as i64)
                    .emit();
                self.view = Some(outcome.view);
                return Err(RouterError::RedirectLoop {
                    path: target.pathname,
                    hops,
                });
            }

            logger
                .debug_builder("redirect")
                .field("from", self.history.location().to_string())
                .field("to", target.to_string())
                .emit();
            self.history.replace(target);
        }
    }

    fn pass(&mut self) -> PassOutcome<H::View> {
        self.gates.begin_pass();

        let outcome = match &self.tree {
            Some(tree) => RenderPass::new(
                tree,
                &self.host,
                &mut self.gates,
                self.history.location(),
                self.on_update.as_ref(),
            )
            .run(),
            None => PassOutcome {
                view: self.host.nothing(),
                redirect: None,
            },
        };

        let unmounted = self.gates.end_pass();
        if unmounted > 0 {
            tracing::debug!(unmounted, "unmounted routes no longer rendered");
        }

        outcome
    }

    /// Wait for the next outstanding precondition and re-render.
    ///
    /// Preconditions of routes that unmounted in the meantime are skipped.
    /// Returns `Ok(None)` once nothing is outstanding.
    pub async fn settle_next(&mut self) -> Result<Option<&H::View>> {
        loop {
            match self.gates.next_settled().await {
                None => return Ok(None),
                Some(Settlement::Discarded(key)) => {
                    tracing::debug!(key = %key, "precondition settled after unmount");
                }
                Some(Settlement::Resolved(key)) => {
                    tracing::debug!(key = %key, "precondition settled");
                    return self.render().map(Some);
                }
            }
        }
    }

    /// Settle preconditions until none are outstanding.
    pub async fn settle_all(&mut self) -> Result<()> {
        while self.settle_next().await?.is_some() {}
        Ok(())
    }

    /// Unmount every route instance and clear the view.
    pub fn unmount(&mut self) {
        self.gates.unmount_all();
        self.view = None;
    }

    /// The last rendered view.
    pub fn view(&self) -> Option<&H::View> {
        self.view.as_ref()
    }

    /// The current location.
    pub fn location(&self) -> &Location {
        self.history.location()
    }

    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    /// The decorated tree, if any routes are configured.
    pub fn tree(&self) -> Option<&RouteTree<H::View>> {
        self.tree.as_ref()
    }

    /// The configured routes.
    pub fn routes(&self) -> &[Route<H::View>] {
        &self.routes
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Number of preconditions still outstanding.
    pub fn pending(&self) -> usize {
        self.gates.pending()
    }

    /// Lifecycle state of the route instance at `full_path`, if mounted.
    pub fn route_state(&self, full_path: &str) -> Option<GateState> {
        let key = self.route_key(full_path)?;
        self.gates.state(&key)
    }

    fn route_key(&self, full_path: &str) -> Option<RouteKey> {
        let tree = self.tree.as_ref()?;
        let id = tree.find_by_full_path(full_path)?;
        Some(tree.node(id).key.clone())
    }
}

impl<H: Host> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("location", self.history.location())
            .field("tree", &self.tree)
            .field("gates", &self.gates)
            .finish()
    }
}
