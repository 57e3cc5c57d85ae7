//! The decorated route tree.
//!
//! Decoration flattens a route configuration into an arena. Nodes refer to
//! each other by [`RouteId`]; the arena slot at [`RouteId::SENTINEL`] is an
//! implicit root whose children are the top-level routes.

use serde_json::{json, Map, Value};
use trellis_core::{Component, IdAllocator, Location, RouteId, RouteInfo, RouteKey};
use trellis_lifecycle::{FallbackPlan, GateHooks};

use crate::matcher::MatchOptions;

/// A renderable content route.
pub struct ContentNode<V> {
    /// Configured relative path.
    pub path: String,
    /// Primary content.
    pub component: Option<Component<V>>,
    /// Shown while the precondition is outstanding.
    pub fallback: Option<Component<V>>,
    /// How the pending view is composed.
    pub fallback_plan: FallbackPlan,
    /// Precondition and lifecycle hooks.
    pub hooks: GateHooks,
    /// Static props.
    pub props: Map<String, Value>,
}

/// A redirect route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectNode {
    /// Configured relative source; `None` for fallbacks.
    pub from: Option<String>,
    /// Configured target, absolute for fallbacks.
    pub to: Location,
    /// Appended by decoration rather than configured.
    pub synthetic: bool,
}

/// What a node does when it is reached.
pub enum NodeKind<V> {
    /// The implicit root above the top-level routes.
    Sentinel,
    /// Content route.
    Content(ContentNode<V>),
    /// Redirect route.
    Redirect(RedirectNode),
    /// A route with neither a path nor a redirect. Never matches.
    Unrenderable,
}

/// A route after decoration.
pub struct DecoratedRoute<V> {
    pub id: RouteId,
    pub parent: Option<RouteId>,
    pub children: Vec<RouteId>,
    /// Absolute path of the parent.
    pub base_path: String,
    /// Absolute path of this route.
    pub full_path: String,
    /// Matches only the full path. True for leaves and root paths.
    pub exact: bool,
    pub strict: bool,
    pub sensitive: bool,
    /// Render identity.
    pub key: RouteKey,
    pub kind: NodeKind<V>,
}

impl<V> DecoratedRoute<V> {
    /// Configured relative path of a content route.
    pub fn path(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Content(content) => Some(&content.path),
            _ => None,
        }
    }

    /// Whether this is a content route.
    pub fn is_content(&self) -> bool {
        matches!(self.kind, NodeKind::Content(_))
    }

    /// Whether this is a redirect without a source path.
    pub fn is_fallback_redirect(&self) -> bool {
        matches!(&self.kind, NodeKind::Redirect(redirect) if redirect.from.is_none())
    }

    /// Whether this is a content route at the root marker path.
    pub fn is_root_path(&self) -> bool {
        self.path().is_some_and(trellis_core::is_root_path)
    }

    /// Whether the node takes part in path lookups.
    pub(crate) fn is_addressable(&self) -> bool {
        matches!(self.kind, NodeKind::Content(_) | NodeKind::Redirect(_))
    }

    /// Matching options for this node.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            exact: self.exact,
            strict: self.strict,
            sensitive: self.sensitive,
        }
    }

    /// Static route information handed to components.
    pub fn info(&self) -> RouteInfo {
        let props = match &self.kind {
            NodeKind::Content(content) => content.props.clone(),
            _ => Map::new(),
        };

        RouteInfo {
            id: self.id,
            key: self.key.clone(),
            path: self.path().map(str::to_string),
            base_path: self.base_path.clone(),
            full_path: self.full_path.clone(),
            props,
        }
    }
}

/// Arena of decorated routes.
pub struct RouteTree<V> {
    nodes: Vec<DecoratedRoute<V>>,
    ids: IdAllocator,
}

impl<V> RouteTree<V> {
    /// Create a tree holding only the sentinel.
    pub(crate) fn new(base_path: &str) -> Self {
        let mut ids = IdAllocator::new();
        let id = ids.allocate();

        let sentinel = DecoratedRoute {
            id,
            parent: None,
            children: Vec::new(),
            base_path: base_path.to_string(),
            full_path: base_path.to_string(),
            exact: false,
            strict: false,
            sensitive: false,
            key: RouteKey::new("sentinel"),
            kind: NodeKind::Sentinel,
        };

        Self {
            nodes: vec![sentinel],
            ids,
        }
    }

    /// Insert a node under `parent`, assigning its id.
    pub(crate) fn insert(&mut self, parent: RouteId, mut node: DecoratedRoute<V>) -> RouteId {
        let id = self.ids.allocate();
        node.id = id;
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Get a node. Panics on ids from another tree.
    pub fn node(&self, id: RouteId) -> &DecoratedRoute<V> {
        &self.nodes[id.index()]
    }

    /// Get a node if the id belongs to this tree.
    pub fn get(&self, id: RouteId) -> Option<&DecoratedRoute<V>> {
        self.nodes.get(id.index())
    }

    /// Ids of the top-level routes, fallback last.
    pub fn top_level(&self) -> &[RouteId] {
        self.children(RouteId::SENTINEL)
    }

    pub fn parent(&self, id: RouteId) -> Option<RouteId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: RouteId) -> &[RouteId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or_default()
    }

    /// Other children of this node's parent, in order.
    pub fn siblings(&self, id: RouteId) -> impl Iterator<Item = RouteId> + '_ {
        let siblings = self.parent(id).map(|parent| self.children(parent)).unwrap_or_default();
        siblings.iter().copied().filter(move |sibling| *sibling != id)
    }

    /// The last child, which decoration guarantees is a fallback redirect.
    pub fn last_child(&self, id: RouteId) -> Option<RouteId> {
        self.children(id).last().copied()
    }

    /// Number of nodes, sentinel included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the sentinel exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All nodes except the sentinel, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &DecoratedRoute<V>> {
        self.nodes.iter().skip(1)
    }

    /// First addressable node whose full path is `full_path`.
    pub fn find_by_full_path(&self, full_path: &str) -> Option<RouteId> {
        self.iter()
            .find(|node| node.is_addressable() && node.full_path == full_path)
            .map(|node| node.id)
    }

    /// Serialize the tree for debugging.
    ///
    /// Capabilities are replaced with markers and parents are named by path,
    /// so the value stays acyclic.
    pub fn to_debug_json(&self) -> Value {
        Value::Array(
            self.top_level()
                .iter()
                .map(|id| self.node_debug_json(*id))
                .collect(),
        )
    }

    fn node_debug_json(&self, id: RouteId) -> Value {
        let node = self.node(id);
        let parent = node
            .parent
            .filter(|parent| !parent.is_sentinel())
            .map(|parent| self.node(parent).full_path.clone());

        let mut value = json!({
            "id": node.id.to_string(),
            "key": node.key.as_str(),
            "basePath": node.base_path,
            "fullPath": node.full_path,
            "exact": node.exact,
            "strict": node.strict,
            "sensitive": node.sensitive,
            "parentRoute": parent,
        });

        let extra = match &node.kind {
            NodeKind::Content(content) => json!({
                "path": content.path,
                "component": content.component.as_ref().map(|_| "[component]"),
                "fallback": content.fallback.as_ref().map(|_| "[component]"),
                "pre": content.hooks.pre.is_some(),
                "onMount": content.hooks.on_mount.is_some(),
                "onUnmount": content.hooks.on_unmount.is_some(),
                "props": content.props,
            }),
            NodeKind::Redirect(redirect) => json!({
                "redirect": {
                    "from": redirect.from,
                    "to": redirect.to.to_string(),
                    "synthetic": redirect.synthetic,
                }
            }),
            NodeKind::Unrenderable => json!({ "unrenderable": true }),
            NodeKind::Sentinel => json!({}),
        };

        if let (Some(object), Value::Object(extra)) = (value.as_object_mut(), extra) {
            object.extend(extra);
            if !node.children.is_empty() {
                let children = node
                    .children
                    .iter()
                    .map(|child| self.node_debug_json(*child))
                    .collect();
                object.insert("childRoutes".to_string(), Value::Array(children));
            }
        }

        value
    }
}

impl<V> std::fmt::Debug for RouteTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTree")
            .field("nodes", &self.nodes.len())
            .field("top_level", &self.top_level())
            .finish()
    }
}
