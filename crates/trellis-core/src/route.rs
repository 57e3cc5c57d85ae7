//! Declarative route configuration.
//!
//! A [`Route`] mirrors one entry of a route configuration: either a content
//! route (path plus component, optional precondition, hooks and children)
//! or a redirect. The builder accepts both kinds of fields on one value so
//! that programmatic configuration stays ergonomic; the decorator rejects
//! redirects that also carry content.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::location::Location;
use crate::path::is_root_path;
use crate::props::RenderProps;

/// Render capability: props plus optional nested content in, view out.
pub type Component<V> = Arc<dyn Fn(&RenderProps, Option<V>) -> V + Send + Sync>;

/// Asynchronous precondition run before a route's content is shown.
pub type PreFn = Arc<dyn Fn(Arc<RenderProps>) -> BoxFuture<'static, ()> + Send + Sync>;

/// Lifecycle hook invoked on mount or unmount.
pub type Hook = Arc<dyn Fn(&RenderProps) + Send + Sync>;

/// Redirect configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectSpec {
    /// Source path, relative to the enclosing route. Unset for catch-alls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Target location. Absolute targets are taken literally.
    pub to: Location,
}

impl RedirectSpec {
    /// A catch-all redirect.
    pub fn to(to: impl Into<Location>) -> Self {
        Self {
            from: None,
            to: to.into(),
        }
    }

    /// A redirect from a specific path.
    pub fn from_to(from: impl Into<String>, to: impl Into<Location>) -> Self {
        Self {
            from: Some(from.into()),
            to: to.into(),
        }
    }

    /// Whether this redirect is a fallback (`to` set, `from` unset).
    pub fn is_fallback(&self) -> bool {
        self.from.is_none() && !self.to.pathname.is_empty()
    }
}

/// One node of a route configuration.
pub struct Route<V> {
    /// Relative path segment.
    pub path: Option<String>,
    /// Ignored: `exact` is derived during decoration.
    pub exact: Option<bool>,
    /// Trailing slashes are significant when matching.
    pub strict: bool,
    /// Matching is case-sensitive.
    pub sensitive: bool,
    /// Primary content.
    pub component: Option<Component<V>>,
    /// Precondition gating the content.
    pub pre: Option<PreFn>,
    /// Shown while `pre` is outstanding.
    pub fallback: Option<Component<V>>,
    /// Render `fallback` inside `component` instead of standalone.
    pub wrap_fallback_with_component: bool,
    /// Static props forwarded to the component.
    pub props: Map<String, Value>,
    /// Invoked once `pre` resolves.
    pub on_mount: Option<Hook>,
    /// Invoked when the route stops rendering.
    pub on_unmount: Option<Hook>,
    /// Redirect instead of content.
    pub redirect: Option<RedirectSpec>,
    /// Nested routes, in match-priority order.
    pub child_routes: Vec<Route<V>>,
    /// Catch-all target for this route's children when they configure none.
    pub default_redirect: Option<String>,
}

impl<V> Route<V> {
    /// Create a content route for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::empty()
        }
    }

    /// Create a route with no fields set.
    pub fn empty() -> Self {
        Self {
            path: None,
            exact: None,
            strict: false,
            sensitive: false,
            component: None,
            pre: None,
            fallback: None,
            wrap_fallback_with_component: false,
            props: Map::new(),
            on_mount: None,
            on_unmount: None,
            redirect: None,
            child_routes: Vec::new(),
            default_redirect: None,
        }
    }

    /// Create a catch-all redirect.
    pub fn redirect(to: impl Into<Location>) -> Self {
        Self {
            redirect: Some(RedirectSpec::to(to)),
            ..Self::empty()
        }
    }

    /// Create a redirect from a specific relative path.
    pub fn redirect_from(from: impl Into<String>, to: impl Into<Location>) -> Self {
        Self {
            redirect: Some(RedirectSpec::from_to(from, to)),
            ..Self::empty()
        }
    }

    /// Set the primary component.
    pub fn component<F>(mut self, component: F) -> Self
    where
        F: Fn(&RenderProps, Option<V>) -> V + Send + Sync + 'static,
    {
        self.component = Some(Arc::new(component));
        self
    }

    /// Set an already shared component.
    pub fn with_component(mut self, component: Component<V>) -> Self {
        self.component = Some(component);
        self
    }

    /// Set the asynchronous precondition.
    pub fn pre<F, Fut>(mut self, pre: F) -> Self
    where
        F: Fn(Arc<RenderProps>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.pre = Some(Arc::new(move |props| pre(props).boxed()));
        self
    }

    /// Set an already shared precondition.
    pub fn with_pre(mut self, pre: PreFn) -> Self {
        self.pre = Some(pre);
        self
    }

    /// Set the fallback shown while `pre` is outstanding.
    pub fn fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&RenderProps, Option<V>) -> V + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(fallback));
        self
    }

    /// Set an already shared fallback.
    pub fn with_fallback(mut self, fallback: Component<V>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Render the fallback as a child of the component.
    pub fn wrap_fallback_with_component(mut self, wrap: bool) -> Self {
        self.wrap_fallback_with_component = wrap;
        self
    }

    /// Set the mount hook.
    pub fn on_mount<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RenderProps) + Send + Sync + 'static,
    {
        self.on_mount = Some(Arc::new(hook));
        self
    }

    /// Set the unmount hook.
    pub fn on_unmount<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RenderProps) + Send + Sync + 'static,
    {
        self.on_unmount = Some(Arc::new(hook));
        self
    }

    /// Add a static prop.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Set whether trailing slashes are significant.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set whether matching is case-sensitive.
    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    /// Accepted for configuration compatibility; decoration derives `exact`.
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Append a child route.
    pub fn child(mut self, route: Route<V>) -> Self {
        self.child_routes.push(route);
        self
    }

    /// Append several child routes.
    pub fn children(mut self, routes: impl IntoIterator<Item = Route<V>>) -> Self {
        self.child_routes.extend(routes);
        self
    }

    /// Set the catch-all target used by this route's children.
    pub fn default_redirect(mut self, to: impl Into<String>) -> Self {
        self.default_redirect = Some(to.into());
        self
    }

    /// Whether this route is a fallback redirect.
    pub fn is_fallback_redirect(&self) -> bool {
        self.redirect.as_ref().is_some_and(RedirectSpec::is_fallback)
    }

    /// Whether any content-bearing field is set.
    pub fn has_content(&self) -> bool {
        self.path.is_some()
            || self.component.is_some()
            || self.pre.is_some()
            || self.fallback.is_some()
            || self.wrap_fallback_with_component
            || !self.props.is_empty()
            || self.on_mount.is_some()
            || self.on_unmount.is_some()
            || !self.child_routes.is_empty()
    }

    /// Whether the route has no precondition and no hooks.
    pub fn is_trivial(&self) -> bool {
        self.pre.is_none() && self.on_mount.is_none() && self.on_unmount.is_none()
    }

    /// Whether the configured path is the root marker.
    pub fn is_root_path(&self) -> bool {
        self.path.as_deref().is_some_and(is_root_path)
    }
}

impl<V> Clone for Route<V> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            exact: self.exact,
            strict: self.strict,
            sensitive: self.sensitive,
            component: self.component.clone(),
            pre: self.pre.clone(),
            fallback: self.fallback.clone(),
            wrap_fallback_with_component: self.wrap_fallback_with_component,
            props: self.props.clone(),
            on_mount: self.on_mount.clone(),
            on_unmount: self.on_unmount.clone(),
            redirect: self.redirect.clone(),
            child_routes: self.child_routes.clone(),
            default_redirect: self.default_redirect.clone(),
        }
    }
}

impl<V> fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("strict", &self.strict)
            .field("sensitive", &self.sensitive)
            .field("component", &self.component.is_some())
            .field("pre", &self.pre.is_some())
            .field("fallback", &self.fallback.is_some())
            .field("redirect", &self.redirect)
            .field("child_routes", &self.child_routes)
            .finish()
    }
}
