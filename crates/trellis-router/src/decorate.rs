//! Route decoration.
//!
//! Decoration turns a route configuration into a [`RouteTree`]: it computes
//! absolute paths, derives `exact`, assigns render keys and makes sure
//! every level ends in a fallback redirect.
//!
//! A level's fallback target is the one it configures, or else the one the
//! level above uses. The top level inherits the router's default redirect.
//! A route's own `default_redirect` replaces the inherited target for its
//! children.

use trellis_core::{
    concat_paths, is_root_path, Location, Result, Route, RouteId, RouteKey, RouterError,
};
use trellis_lifecycle::{FallbackPlan, GateHooks};

use crate::tree::{ContentNode, DecoratedRoute, NodeKind, RedirectNode, RouteTree};

/// Decorate a route configuration.
///
/// Returns `Ok(None)` for an empty configuration.
///
/// # Errors
///
/// - [`RouterError::RedirectWithContent`] if a redirect carries any content
///   field.
/// - [`RouterError::RootPathWithChildren`] if a root-path route has
///   children.
pub fn decorate<V>(
    routes: &[Route<V>],
    base_path: &str,
    default_redirect: &str,
) -> Result<Option<RouteTree<V>>> {
    if routes.is_empty() {
        return Ok(None);
    }

    let mut decorator = Decorator {
        tree: RouteTree::new(base_path),
        default_redirect,
    };
    let inherited = Location::parse(default_redirect).resolved_against(base_path);
    decorator.level(RouteId::SENTINEL, routes, base_path, &inherited)?;

    tracing::debug!(
        nodes = decorator.tree.len(),
        top_level = decorator.tree.top_level().len(),
        "decorated routes"
    );

    Ok(Some(decorator.tree))
}

struct Decorator<'a, V> {
    tree: RouteTree<V>,
    default_redirect: &'a str,
}

impl<V> Decorator<'_, V> {
    fn level(
        &mut self,
        parent: RouteId,
        routes: &[Route<V>],
        base_path: &str,
        inherited: &Location,
    ) -> Result<()> {
        let configured = routes
            .last()
            .filter(|route| route.is_fallback_redirect())
            .and_then(|route| route.redirect.as_ref());

        let level_target = match configured {
            Some(redirect) => redirect.to.resolved_against(base_path),
            None => inherited.clone(),
        };

        for route in routes {
            self.route(parent, route, base_path, &level_target)?;
        }

        if configured.is_none() {
            self.synthetic_fallback(parent, base_path, inherited.clone());
        }

        Ok(())
    }

    fn route(
        &mut self,
        parent: RouteId,
        route: &Route<V>,
        base_path: &str,
        level_target: &Location,
    ) -> Result<()> {
        if let Some(redirect) = &route.redirect {
            if route.has_content() {
                return Err(RouterError::RedirectWithContent {
                    base_path: base_path.to_string(),
                });
            }

            let full_path = match &redirect.from {
                Some(from) => concat_paths(base_path, from),
                None => concat_paths(base_path, self.default_redirect),
            };
            let key = RouteKey::compose(
                base_path,
                redirect.from.as_deref(),
                &redirect.to.to_string(),
                route.strict,
                route.sensitive,
                false,
            );

            self.tree.insert(
                parent,
                DecoratedRoute {
                    id: RouteId::SENTINEL,
                    parent: None,
                    children: Vec::new(),
                    base_path: base_path.to_string(),
                    full_path,
                    exact: true,
                    strict: route.strict,
                    sensitive: route.sensitive,
                    key,
                    kind: NodeKind::Redirect(RedirectNode {
                        from: redirect.from.clone(),
                        to: redirect.to.clone(),
                        synthetic: false,
                    }),
                },
            );
            return Ok(());
        }

        let Some(path) = &route.path else {
            tracing::debug!(base_path, "route without path or redirect is never rendered");
            self.tree.insert(
                parent,
                DecoratedRoute {
                    id: RouteId::SENTINEL,
                    parent: None,
                    children: Vec::new(),
                    base_path: base_path.to_string(),
                    full_path: concat_paths(base_path, ""),
                    exact: true,
                    strict: route.strict,
                    sensitive: route.sensitive,
                    key: RouteKey::compose(base_path, None, "", false, false, false),
                    kind: NodeKind::Unrenderable,
                },
            );
            return Ok(());
        };

        let has_children = !route.child_routes.is_empty();
        if has_children && is_root_path(path) {
            return Err(RouterError::RootPathWithChildren {
                base_path: base_path.to_string(),
            });
        }

        let full_path = concat_paths(base_path, path);
        let props = serde_json::to_string(&route.props)?;
        let key = RouteKey::compose(
            base_path,
            Some(path),
            &props,
            route.strict,
            route.sensitive,
            has_children,
        );

        let id = self.tree.insert(
            parent,
            DecoratedRoute {
                id: RouteId::SENTINEL,
                parent: None,
                children: Vec::new(),
                base_path: base_path.to_string(),
                full_path: full_path.clone(),
                exact: !has_children || is_root_path(path),
                strict: route.strict,
                sensitive: route.sensitive,
                key,
                kind: NodeKind::Content(ContentNode {
                    path: path.clone(),
                    component: route.component.clone(),
                    fallback: route.fallback.clone(),
                    fallback_plan: FallbackPlan::for_route(
                        route.fallback.is_some(),
                        route.wrap_fallback_with_component,
                    ),
                    hooks: GateHooks {
                        pre: route.pre.clone(),
                        on_mount: route.on_mount.clone(),
                        on_unmount: route.on_unmount.clone(),
                    },
                    props: route.props.clone(),
                }),
            },
        );

        if has_children {
            let inherited = match &route.default_redirect {
                Some(target) => Location::parse(target).resolved_against(&full_path),
                None => level_target.clone(),
            };
            self.level(id, &route.child_routes, &full_path, &inherited)?;
        }

        Ok(())
    }

    fn synthetic_fallback(&mut self, parent: RouteId, base_path: &str, to: Location) {
        let key = RouteKey::compose(base_path, None, &to.to_string(), false, false, false);

        self.tree.insert(
            parent,
            DecoratedRoute {
                id: RouteId::SENTINEL,
                parent: None,
                children: Vec::new(),
                base_path: base_path.to_string(),
                full_path: concat_paths(base_path, self.default_redirect),
                exact: true,
                strict: false,
                sensitive: false,
                key,
                kind: NodeKind::Redirect(RedirectNode {
                    from: None,
                    to,
                    synthetic: true,
                }),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &'static str) -> Route<String> {
        Route::new(format!("/{}", name.to_lowercase())).component(move |_, _| name.to_string())
    }

    fn redirect_to<V>(tree: &RouteTree<V>, id: RouteId) -> String {
        match &tree.node(id).kind {
            NodeKind::Redirect(redirect) => redirect.to.pathname.clone(),
            _ => panic!("not a redirect: {}", id),
        }
    }

    #[test]
    fn test_empty_configuration() {
        let tree = decorate::<String>(&[], "/", "/404").unwrap();
        assert!(tree.is_none());
    }

    #[test]
    fn test_top_level_gets_synthetic_fallback() {
        let tree = decorate(&[text("One"), text("Two")], "/", "/404")
            .unwrap()
            .unwrap();

        let top = tree.top_level();
        assert_eq!(top.len(), 3);
        let last = tree.node(top[2]);
        assert!(last.is_fallback_redirect());
        assert_eq!(last.full_path, "/404");
        assert_eq!(redirect_to(&tree, top[2]), "/404");
        assert!(matches!(
            &last.kind,
            NodeKind::Redirect(RedirectNode { synthetic: true, .. })
        ));
    }

    #[test]
    fn test_configured_fallback_is_kept() {
        let routes = vec![text("One"), Route::redirect("/one")];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        assert_eq!(tree.top_level().len(), 2);
        assert_eq!(redirect_to(&tree, tree.top_level()[1]), "/one");
    }

    #[test]
    fn test_paths_and_exactness() {
        let routes = vec![
            Route::new("/")
                .component(|_, _| "Home".to_string()),
            text("Parent").child(text("Nested")),
        ];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        let home = tree.node(tree.top_level()[0]);
        assert_eq!(home.full_path, "/");
        assert!(home.exact);

        let parent = tree.node(tree.top_level()[1]);
        assert_eq!(parent.full_path, "/parent");
        assert!(!parent.exact);

        let nested = tree.node(parent.children[0]);
        assert_eq!(nested.base_path, "/parent");
        assert_eq!(nested.full_path, "/parent/nested");
        assert!(nested.exact);
        assert_eq!(tree.parent(nested.id), Some(parent.id));
    }

    #[test]
    fn test_every_level_ends_in_fallback() {
        let ghost = text("Ghost")
            .child(text("Definitely"))
            .child(text("Nothing").child(text("Aaaahhhhh")))
            .child(Route::redirect("/house/couch/scary/ghost/definitely"));
        let scary = text("Scary")
            .child(Route::new("/").component(|_, _| "Jackpot".to_string()))
            .child(text("Kingdom").child(text("Throneroom")))
            .child(ghost);
        let routes = vec![
            text("Park").child(text("Walk")),
            text("House")
                .child(
                    text("Car")
                        .child(text("Portal"))
                        .child(Route::redirect("/house/couch/scary")),
                )
                .child(text("Couch").child(scary))
                .child(text("Sleep"))
                .child(Route::redirect("/house/sleep")),
            text("404"),
        ];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        let parents: Vec<RouteId> = std::iter::once(RouteId::SENTINEL)
            .chain(tree.iter().map(|node| node.id))
            .filter(|id| !tree.children(*id).is_empty())
            .collect();
        assert_eq!(parents.len(), 9);

        for parent in parents {
            let last = tree.last_child(parent).unwrap();
            assert!(
                tree.node(last).is_fallback_redirect(),
                "children of {} do not end in a fallback",
                tree.node(parent).full_path
            );
            assert!(tree
                .children(parent)
                .iter()
                .filter(|child| tree.node(**child).is_fallback_redirect())
                .eq([&last]));
        }
    }

    #[test]
    fn test_nested_level_inherits_fallback_target() {
        let routes = vec![
            text("House").child(text("Car")),
            Route::redirect("/park"),
        ];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        let house = tree.node(tree.top_level()[0]);
        assert_eq!(house.children.len(), 2);

        let fallback = house.children[1];
        assert_eq!(redirect_to(&tree, fallback), "/park");
        assert_eq!(tree.node(fallback).full_path, "/house/404");
    }

    #[test]
    fn test_relative_fallback_target_is_resolved_for_children() {
        let routes = vec![text("House")
            .child(text("Couch").child(text("Scary")))
            .child(Route::redirect("sleep"))];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        let house = tree.node(tree.top_level()[0]);
        let couch = tree.node(house.children[0]);
        assert_eq!(redirect_to(&tree, couch.children[1]), "/house/sleep");
    }

    #[test]
    fn test_default_redirect_overrides_for_children() {
        let routes = vec![text("Admin")
            .default_redirect("/login")
            .child(text("Users"))];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        let admin = tree.node(tree.top_level()[0]);
        assert_eq!(redirect_to(&tree, admin.children[1]), "/login");
        assert_eq!(redirect_to(&tree, tree.top_level()[1]), "/404");
    }

    #[test]
    fn test_from_redirect_full_path() {
        let routes = vec![text("House").child(Route::redirect_from("/old", "/new"))];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        let house = tree.node(tree.top_level()[0]);
        let from = tree.node(house.children[0]);
        assert_eq!(from.full_path, "/house/old");
        assert!(!from.is_fallback_redirect());
        assert_eq!(house.children.len(), 2);
    }

    #[test]
    fn test_redirect_with_content_is_rejected() {
        let routes = vec![text("One").child(Route::redirect("/x").component(|_, _| String::new()))];
        let err = decorate(&routes, "/", "/404").unwrap_err();

        assert_eq!(
            err,
            RouterError::RedirectWithContent {
                base_path: "/one".to_string()
            }
        );
    }

    #[test]
    fn test_root_path_with_children_is_rejected() {
        let routes = vec![Route::new("/").child(text("Nested"))];
        let err = decorate(&routes, "/", "/404").unwrap_err();
        assert!(matches!(err, RouterError::RootPathWithChildren { .. }));
    }

    #[test]
    fn test_pathless_route_is_unrenderable() {
        let routes = vec![Route::<String>::empty().component(|_, _| "Nope".to_string())];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        assert!(matches!(
            tree.node(tree.top_level()[0]).kind,
            NodeKind::Unrenderable
        ));
    }

    #[test]
    fn test_keys_are_stable_across_decorations() {
        let routes = vec![text("One").prop("title", "One").child(text("Two"))];
        let first = decorate(&routes, "/", "/404").unwrap().unwrap();
        let second = decorate(&routes, "/", "/404").unwrap().unwrap();

        let keys = |tree: &RouteTree<String>| tree.iter().map(|n| n.key.clone()).collect::<Vec<_>>();
        assert_eq!(keys(&first), keys(&second));
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let routes = vec![text("A").child(text("B")), text("C")];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        let ids: Vec<u32> = tree.iter().map(|n| n.id.index() as u32).collect();
        let expected: Vec<u32> = (1..tree.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_family_navigation() {
        let routes = vec![text("A"), text("B"), text("C")];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();

        let b = tree.top_level()[1];
        let siblings: Vec<RouteId> = tree.siblings(b).collect();
        assert_eq!(siblings, vec![tree.top_level()[0], tree.top_level()[2], tree.top_level()[3]]);
        assert_eq!(tree.last_child(RouteId::SENTINEL), Some(tree.top_level()[3]));
        assert_eq!(tree.find_by_full_path("/c"), Some(tree.top_level()[2]));
    }

    #[test]
    fn test_debug_json_is_acyclic() {
        let routes = vec![text("A").child(text("B"))];
        let tree = decorate(&routes, "/", "/404").unwrap().unwrap();
        let dump = tree.to_debug_json();

        assert_eq!(dump[0]["component"], "[component]");
        assert_eq!(dump[0]["childRoutes"][0]["parentRoute"], "/a");
        assert_eq!(dump[0]["childRoutes"][1]["redirect"]["to"], "/404");
        assert!(dump[0]["parentRoute"].is_null());
    }
}
