//! Resolution of a location against a matched route.
//!
//! A route that matched by prefix checks whether the pathname names one of
//! its descendants exactly. If it does not, the deepest content route that
//! is still a prefix of the pathname decides which fallback redirect fires.

use std::borrow::Cow;

use trellis_core::RouteId;

use crate::matcher::MatchOptions;
use crate::tree::RouteTree;

/// Outcome of resolving a pathname below a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The route or one of its descendants has exactly this full path.
    Exact(RouteId),
    /// No exact match; redirect via `fallback`.
    Redirect { ancestor: RouteId, fallback: RouteId },
    /// Neither an exact match nor a usable ancestor.
    Unresolved,
}

/// Bring a path into the form a route compares it in. Without `strict` one
/// trailing slash is dropped, and without `sensitive` case is folded.
fn normalize(path: &str, options: MatchOptions) -> Cow<'_, str> {
    let path = if options.strict || path.len() <= 1 {
        path
    } else {
        path.strip_suffix('/').unwrap_or(path)
    };

    if options.sensitive {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(path.to_ascii_lowercase())
    }
}

fn same_path(full_path: &str, path: &str, options: MatchOptions) -> bool {
    normalize(full_path, options) == normalize(path, options)
}

fn has_prefix(path: &str, full_path: &str, options: MatchOptions) -> bool {
    normalize(path, options).starts_with(normalize(full_path, options).as_ref())
}

/// Depth-first search for a node whose full path equals `path`.
///
/// Returns the deepest-first match in configuration order, starting with
/// `id` itself. The sentinel and unrenderable nodes never match.
pub fn find_exact_descendant<V>(tree: &RouteTree<V>, id: RouteId, path: &str) -> Option<RouteId> {
    let node = tree.get(id)?;

    if node.is_addressable() && same_path(&node.full_path, path, node.match_options()) {
        return Some(id);
    }

    node.children
        .iter()
        .find_map(|child| find_exact_descendant(tree, *child, path))
}

/// Deepest content route at or below `id` whose full path prefixes `path`.
///
/// Descends into the first content child that is still a prefix. Returns
/// `None` if `id` is not a prefix, and also when the descent reaches a
/// root-path route.
pub fn find_closest_ancestor<V>(tree: &RouteTree<V>, id: RouteId, path: &str) -> Option<RouteId> {
    let node = tree.get(id)?;

    if !node.is_content()
        || node.is_root_path()
        || !has_prefix(path, &node.full_path, node.match_options())
    {
        return None;
    }

    let next = node.children.iter().copied().find(|child| {
        let child = tree.node(*child);
        child.is_content() && has_prefix(path, &child.full_path, child.match_options())
    });

    match next {
        Some(child) => find_closest_ancestor(tree, child, path),
        None => Some(id),
    }
}

/// Resolve `path` below the route `id`.
///
/// On a miss, the fallback is the last child of the closest ancestor, or
/// of its parent if the ancestor has no children.
pub fn resolve<V>(tree: &RouteTree<V>, id: RouteId, path: &str) -> Resolution {
    if let Some(found) = find_exact_descendant(tree, id, path) {
        return Resolution::Exact(found);
    }

    let Some(ancestor) = find_closest_ancestor(tree, id, path) else {
        return Resolution::Unresolved;
    };

    let holder = if tree.children(ancestor).is_empty() {
        tree.parent(ancestor)
    } else {
        Some(ancestor)
    };

    match holder.and_then(|holder| tree.last_child(holder)) {
        Some(fallback) => Resolution::Redirect { ancestor, fallback },
        None => Resolution::Unresolved,
    }
}
