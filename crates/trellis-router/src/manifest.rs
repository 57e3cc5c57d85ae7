//! Route manifests.
//!
//! A manifest is the serializable form of a route configuration. Capabilities
//! (components, preconditions, hooks) are referenced by name and looked up
//! in a [`ComponentRegistry`] when the manifest is built into [`Route`]s.
//!
//! JSON manifests are a single route object or an array of routes. TOML
//! manifests carry the routes in a `[[routes]]` array and may include a
//! `[router]` table with the [`RouterConfig`].

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use trellis_core::{
    Component, Hook, Location, PreFn, RedirectSpec, RenderProps, Result, Route, RouterError,
};

use crate::config::RouterConfig;

/// Serialized redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
}

/// Serialized route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Accepted and ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,

    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub sensitive: bool,

    /// Registered component name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Registered precondition name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,

    /// Registered fallback component name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,

    #[serde(default)]
    pub wrap_fallback_with_component: bool,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,

    /// Registered hook name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_mount: Option<String>,

    /// Registered hook name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_unmount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectManifest>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_routes: Vec<RouteManifest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_redirect: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Many(Vec<RouteManifest>),
    One(Box<RouteManifest>),
}

/// A TOML routes file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutesFile {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub routes: Vec<RouteManifest>,
}

impl RouteManifest {
    /// Parse a JSON manifest holding one route or an array of routes.
    pub fn parse_json(content: &str) -> Result<Vec<RouteManifest>> {
        match serde_json::from_str(content)? {
            JsonDocument::Many(routes) => Ok(routes),
            JsonDocument::One(route) => Ok(vec![*route]),
        }
    }

    /// Parse a TOML routes file.
    pub fn parse_toml(content: &str) -> Result<RoutesFile> {
        toml::from_str(content).map_err(|e| RouterError::Manifest(e.to_string()))
    }
}

/// Named capabilities referenced by manifests.
pub struct ComponentRegistry<V> {
    components: HashMap<String, Component<V>>,
    preconditions: HashMap<String, PreFn>,
    hooks: HashMap<String, Hook>,
}

impl<V> Default for ComponentRegistry<V> {
    fn default() -> Self {
        Self {
            components: HashMap::new(),
            preconditions: HashMap::new(),
            hooks: HashMap::new(),
        }
    }
}

impl<V> ComponentRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component or fallback.
    pub fn component<F>(mut self, name: impl Into<String>, component: F) -> Self
    where
        F: Fn(&RenderProps, Option<V>) -> V + Send + Sync + 'static,
    {
        self.components.insert(name.into(), Arc::new(component));
        self
    }

    /// Register a precondition.
    pub fn pre<F, Fut>(mut self, name: impl Into<String>, pre: F) -> Self
    where
        F: Fn(Arc<RenderProps>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let pre: PreFn = Arc::new(move |props| pre(props).boxed());
        self.preconditions.insert(name.into(), pre);
        self
    }

    /// Register a mount or unmount hook.
    pub fn hook<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&RenderProps) + Send + Sync + 'static,
    {
        self.hooks.insert(name.into(), Arc::new(hook));
        self
    }

    fn lookup<T: Clone>(map: &HashMap<String, T>, name: Option<&String>) -> Result<Option<T>> {
        match name {
            None => Ok(None),
            Some(name) => map
                .get(name)
                .cloned()
                .map(Some)
                .ok_or_else(|| RouterError::UnknownComponent { name: name.clone() }),
        }
    }

    /// Build one manifest into a route.
    ///
    /// # Errors
    ///
    /// [`RouterError::UnknownComponent`] if a referenced name was never
    /// registered.
    pub fn build(&self, manifest: &RouteManifest) -> Result<Route<V>> {
        Ok(Route {
            path: manifest.path.clone(),
            exact: manifest.exact,
            strict: manifest.strict,
            sensitive: manifest.sensitive,
            component: Self::lookup(&self.components, manifest.component.as_ref())?,
            pre: Self::lookup(&self.preconditions, manifest.pre.as_ref())?,
            fallback: Self::lookup(&self.components, manifest.fallback.as_ref())?,
            wrap_fallback_with_component: manifest.wrap_fallback_with_component,
            props: manifest.props.clone(),
            on_mount: Self::lookup(&self.hooks, manifest.on_mount.as_ref())?,
            on_unmount: Self::lookup(&self.hooks, manifest.on_unmount.as_ref())?,
            redirect: manifest.redirect.as_ref().map(|redirect| RedirectSpec {
                from: redirect.from.clone(),
                to: Location::parse(&redirect.to),
            }),
            child_routes: self.build_all(&manifest.child_routes)?,
            default_redirect: manifest.default_redirect.clone(),
        })
    }

    /// Build a list of manifests.
    pub fn build_all(&self, manifests: &[RouteManifest]) -> Result<Vec<Route<V>>> {
        manifests.iter().map(|manifest| self.build(manifest)).collect()
    }
}

impl<V> fmt::Debug for ComponentRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components: Vec<&String> = self.components.keys().collect();
        components.sort();
        f.debug_struct("ComponentRegistry")
            .field("components", &components)
            .field("preconditions", &self.preconditions.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ComponentRegistry<String> {
        ComponentRegistry::new()
            .component("Home", |_, _| "Home".to_string())
            .component("Spinner", |_, _| "Loading".to_string())
            .pre("auth", |_| async {})
            .hook("track", |_| {})
    }

    #[test]
    fn test_parse_json_array() {
        let routes = RouteManifest::parse_json(
            r#"[
                {"path": "/", "component": "Home"},
                {"redirect": {"to": "/"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].component.as_deref(), Some("Home"));
        assert_eq!(routes[1].redirect.as_ref().unwrap().to, "/");
    }

    #[test]
    fn test_parse_json_single_route() {
        let routes = RouteManifest::parse_json(
            r#"{"path": "/admin", "childRoutes": [{"path": "/users"}], "defaultRedirect": "/login"}"#,
        )
        .unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].child_routes[0].path.as_deref(), Some("/users"));
        assert_eq!(routes[0].default_redirect.as_deref(), Some("/login"));
    }

    #[test]
    fn test_parse_json_error() {
        let err = RouteManifest::parse_json("{not json").unwrap_err();
        assert!(matches!(err, RouterError::Manifest(_)));
    }

    #[test]
    fn test_parse_toml() {
        let file = RouteManifest::parse_toml(
            r#"
            [router]
            default_redirect = "/missing"

            [[routes]]
            path = "/"
            component = "Home"

            [[routes]]
            path = "/account"
            component = "Home"
            pre = "auth"
            fallback = "Spinner"
            wrapFallbackWithComponent = true

            [[routes.childRoutes]]
            path = "/orders"
            component = "Home"
            "#,
        )
        .unwrap();

        assert_eq!(file.router.default_redirect, "/missing");
        assert_eq!(file.routes.len(), 2);
        assert!(file.routes[1].wrap_fallback_with_component);
        assert_eq!(file.routes[1].child_routes.len(), 1);
    }

    #[test]
    fn test_build_resolves_names() {
        let manifest = RouteManifest {
            path: Some("/account".to_string()),
            component: Some("Home".to_string()),
            pre: Some("auth".to_string()),
            fallback: Some("Spinner".to_string()),
            on_mount: Some("track".to_string()),
            ..Default::default()
        };

        let route = registry().build(&manifest).unwrap();

        assert!(route.component.is_some());
        assert!(route.pre.is_some());
        assert!(route.fallback.is_some());
        assert!(route.on_mount.is_some());
        assert!(route.on_unmount.is_none());
    }

    #[test]
    fn test_build_unknown_component() {
        let manifest = RouteManifest {
            path: Some("/".to_string()),
            component: Some("Missing".to_string()),
            ..Default::default()
        };

        let err = registry().build(&manifest).unwrap_err();
        assert_eq!(
            err,
            RouterError::UnknownComponent {
                name: "Missing".to_string()
            }
        );
    }

    #[test]
    fn test_build_redirect() {
        let manifest = RouteManifest {
            redirect: Some(RedirectManifest {
                from: Some("/old".to_string()),
                to: "/new?tab=1".to_string(),
            }),
            ..Default::default()
        };

        let route = registry().build(&manifest).unwrap();
        let redirect = route.redirect.unwrap();

        assert_eq!(redirect.from.as_deref(), Some("/old"));
        assert_eq!(redirect.to.pathname, "/new");
        assert_eq!(redirect.to.search, "?tab=1");
    }
}
