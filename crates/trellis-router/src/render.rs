//! One render pass over the decorated tree.
//!
//! Each level is a switch: the first child that matches the pathname
//! renders and the rest are skipped. Gated routes are entered in the
//! [`GateRegistry`] as they render, so mounts happen in render order.

use trellis_core::{Component, Hook, Location, PathMatch, RenderProps, RouteId};
use trellis_lifecycle::{render_fallback, GateRegistry};

use crate::host::Host;
use crate::resolve::{resolve, Resolution};
use crate::tree::{ContentNode, NodeKind, RouteTree};

/// Result of a render pass.
pub(crate) struct PassOutcome<V> {
    pub view: V,
    /// First redirect that fired during the pass.
    pub redirect: Option<Location>,
}

pub(crate) struct RenderPass<'a, H: Host> {
    tree: &'a RouteTree<H::View>,
    host: &'a H,
    gates: &'a mut GateRegistry,
    location: &'a Location,
    on_update: Option<&'a Hook>,
    redirect: Option<Location>,
}

impl<'a, H: Host> RenderPass<'a, H> {
    pub fn new(
        tree: &'a RouteTree<H::View>,
        host: &'a H,
        gates: &'a mut GateRegistry,
        location: &'a Location,
        on_update: Option<&'a Hook>,
    ) -> Self {
        Self {
            tree,
            host,
            gates,
            location,
            on_update,
            redirect: None,
        }
    }

    pub fn run(mut self) -> PassOutcome<H::View> {
        let view = match self.switch(RouteId::SENTINEL) {
            Some(view) => view,
            None => self.host.nothing(),
        };

        PassOutcome {
            view,
            redirect: self.redirect,
        }
    }

    /// Render the first matching child of `parent`.
    fn switch(&mut self, parent: RouteId) -> Option<H::View> {
        let tree = self.tree;
        let location = self.location;
        let pathname = location.pathname.as_str();

        for &child in tree.children(parent) {
            let node = tree.node(child);

            match &node.kind {
                NodeKind::Sentinel | NodeKind::Unrenderable => continue,
                NodeKind::Redirect(redirect) => {
                    let matches = redirect.from.is_none()
                        || self
                            .host
                            .match_path(pathname, &node.full_path, node.match_options())
                            .is_some();
                    if matches {
                        return Some(self.follow(child));
                    }
                }
                NodeKind::Content(content) => {
                    if let Some(matched) =
                        self.host
                            .match_path(pathname, &node.full_path, node.match_options())
                    {
                        return Some(self.content(child, content, matched));
                    }
                }
            }
        }

        None
    }

    fn content(
        &mut self,
        id: RouteId,
        content: &'a ContentNode<H::View>,
        matched: PathMatch,
    ) -> H::View {
        let tree = self.tree;
        let node = tree.node(id);

        if let Resolution::Redirect { ancestor, fallback } =
            resolve(tree, id, &self.location.pathname)
        {
            tracing::debug!(
                route = %node.full_path,
                ancestor = %tree.node(ancestor).full_path,
                "no exact route, following fallback"
            );
            return self.follow(fallback);
        }

        let Some(component) = &content.component else {
            return self.host.nothing();
        };

        let props = RenderProps {
            location: self.location.clone(),
            matched,
            route: node.info(),
        };

        if content.hooks.is_trivial() {
            return self.primary(id, component, &props);
        }

        let state = self.gates.enter(&node.key, &content.hooks, &props);
        if state.is_resolved() {
            return self.primary(id, component, &props);
        }

        let host = self.host;
        render_fallback(
            content.fallback_plan,
            Some(component),
            content.fallback.as_ref(),
            &props,
            || host.nothing(),
        )
    }

    /// Render the component with its nested switch as children.
    fn primary(
        &mut self,
        id: RouteId,
        component: &Component<H::View>,
        props: &RenderProps,
    ) -> H::View {
        if let Some(on_update) = self.on_update {
            on_update(props);
        }

        let children = if self.tree.children(id).is_empty() {
            None
        } else {
            let nested = self.switch(id);
            Some(nested.unwrap_or_else(|| self.host.nothing()))
        };

        component(props, children)
    }

    /// Record the redirect and render what the host leaves in its place.
    fn follow(&mut self, id: RouteId) -> H::View {
        let tree = self.tree;
        let node = tree.node(id);
        let NodeKind::Redirect(redirect) = &node.kind else {
            return self.host.nothing();
        };

        let to = redirect.to.resolved_against(&node.base_path);
        if self.redirect.is_none() {
            self.redirect = Some(to.clone());
        }

        self.host.redirect(&to)
    }
}
