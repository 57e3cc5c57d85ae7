//! Props handed to route components, hooks and preconditions.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::identity::{RouteId, RouteKey};
use crate::location::Location;
use crate::path::ROOT_PATH;

/// Named path parameters (e.g., `:id` in `/product/:id`).
pub type Params = BTreeMap<String, String>;

/// Result of matching a location against a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMatch {
    /// The pattern that matched.
    pub path: String,
    /// The matched portion of the pathname.
    pub url: String,
    /// Whether the whole pathname was consumed.
    pub is_exact: bool,
    /// Extracted parameters.
    pub params: Params,
}

impl PathMatch {
    /// The implicit match of the top-level switch.
    pub fn root(pathname: &str) -> Self {
        Self {
            path: ROOT_PATH.to_string(),
            url: ROOT_PATH.to_string(),
            is_exact: pathname == ROOT_PATH,
            params: Params::new(),
        }
    }

    /// Get a parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }
}

/// Static information about the route being rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInfo {
    /// Node id in the decorated tree.
    pub id: RouteId,
    /// Render key of this route instance.
    pub key: RouteKey,
    /// Configured relative path.
    pub path: Option<String>,
    /// Absolute path of the parent.
    pub base_path: String,
    /// Absolute path of this route.
    pub full_path: String,
    /// Static props from configuration.
    pub props: Map<String, Value>,
}

/// Props passed to components, `pre`, `on_mount` and `on_unmount`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderProps {
    /// Current location.
    pub location: Location,
    /// How the route matched the location.
    pub matched: PathMatch,
    /// The route being rendered.
    pub route: RouteInfo,
}

impl RenderProps {
    /// Get a path parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.matched.param(name)
    }

    /// Get a static route prop by name.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.route.props.get(name)
    }

    /// Freeze these props into a shared snapshot.
    pub fn snapshot(&self) -> Arc<RenderProps> {
        Arc::new(self.clone())
    }
}
