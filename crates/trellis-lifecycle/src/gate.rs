//! Gate registry for mounted route instances.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use trellis_core::{Hook, PreFn, RenderProps, RouteKey};

use crate::token::MountToken;

/// State of a mounted route instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Waiting for the precondition; the fallback is shown.
    PrePending,
    /// Precondition done and `on_mount` called; content is shown.
    Resolved,
}

impl GateState {
    /// Whether primary content may render.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

/// The lifecycle capabilities of one route.
#[derive(Clone, Default)]
pub struct GateHooks {
    /// Precondition.
    pub pre: Option<PreFn>,
    /// Called after the precondition resolves.
    pub on_mount: Option<Hook>,
    /// Called when the instance unmounts.
    pub on_unmount: Option<Hook>,
}

impl GateHooks {
    /// Routes without any lifecycle capability skip the gate entirely.
    pub fn is_trivial(&self) -> bool {
        self.pre.is_none() && self.on_mount.is_none() && self.on_unmount.is_none()
    }
}

impl fmt::Debug for GateHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateHooks")
            .field("pre", &self.pre.is_some())
            .field("on_mount", &self.on_mount.is_some())
            .field("on_unmount", &self.on_unmount.is_some())
            .finish()
    }
}

/// A mounted route instance.
struct Gate {
    state: GateState,
    token: MountToken,
    snapshot: Arc<RenderProps>,
    hooks: GateHooks,
}

/// A precondition that ran to completion.
struct Settled {
    key: RouteKey,
    token: MountToken,
}

/// What happened to a settled precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The instance is still mounted: `on_mount` ran and content may render.
    Resolved(RouteKey),
    /// The instance unmounted before the precondition finished.
    Discarded(RouteKey),
}

/// Tracks mounted route instances across render passes.
///
/// A render pass calls [`GateRegistry::begin_pass`], then
/// [`GateRegistry::enter`] for every gated route it renders, then
/// [`GateRegistry::end_pass`], which unmounts whatever was not entered.
#[derive(Default)]
pub struct GateRegistry {
    gates: HashMap<RouteKey, Gate>,
    visited: HashSet<RouteKey>,
    pending: FuturesUnordered<BoxFuture<'static, Settled>>,
}

impl GateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render pass.
    pub fn begin_pass(&mut self) {
        self.visited.clear();
    }

    /// Enter a gated route during a render pass, mounting it if needed.
    ///
    /// `props` are frozen at mount time; later passes do not replace the
    /// snapshot handed to hooks.
    pub fn enter(&mut self, key: &RouteKey, hooks: &GateHooks, props: &RenderProps) -> GateState {
        self.visited.insert(key.clone());

        if let Some(gate) = self.gates.get(key) {
            return gate.state;
        }

        let gate = self.mount(key, hooks, props);
        let state = gate.state;
        self.gates.insert(key.clone(), gate);
        state
    }

    fn mount(&mut self, key: &RouteKey, hooks: &GateHooks, props: &RenderProps) -> Gate {
        let snapshot = props.snapshot();
        let token = MountToken::new();

        let state = match &hooks.pre {
            Some(pre) => {
                let run = pre(Arc::clone(&snapshot));
                let key = key.clone();
                let settled_token = token.clone();
                self.pending.push(
                    async move {
                        run.await;
                        Settled {
                            key,
                            token: settled_token,
                        }
                    }
                    .boxed(),
                );
                GateState::PrePending
            }
            None => {
                if let Some(on_mount) = &hooks.on_mount {
                    on_mount(&snapshot);
                }
                GateState::Resolved
            }
        };

        tracing::debug!(key = %key, ?state, "route mounted");

        Gate {
            state,
            token,
            snapshot,
            hooks: hooks.clone(),
        }
    }

    /// Finish a render pass, unmounting instances that were not entered.
    ///
    /// Returns the number of unmounted instances.
    pub fn end_pass(&mut self) -> usize {
        let stale: Vec<RouteKey> = self
            .gates
            .keys()
            .filter(|key| !self.visited.contains(*key))
            .cloned()
            .collect();

        for key in &stale {
            self.unmount(key);
        }

        stale.len()
    }

    /// Unmount every instance.
    pub fn unmount_all(&mut self) {
        let keys: Vec<RouteKey> = self.gates.keys().cloned().collect();
        for key in &keys {
            self.unmount(key);
        }
        self.visited.clear();
    }

    fn unmount(&mut self, key: &RouteKey) {
        if let Some(gate) = self.gates.remove(key) {
            gate.token.cancel();
            if let Some(on_unmount) = &gate.hooks.on_unmount {
                on_unmount(&gate.snapshot);
            }
            tracing::debug!(key = %key, state = ?gate.state, "route unmounted");
        }
    }

    /// Wait for the next outstanding precondition and apply its effects.
    ///
    /// Returns `None` once nothing is outstanding.
    pub async fn next_settled(&mut self) -> Option<Settlement> {
        let settled = self.pending.next().await?;

        let live = self
            .gates
            .get_mut(&settled.key)
            .filter(|gate| !settled.token.is_cancelled() && gate.token.same_mount(&settled.token));

        let Some(gate) = live else {
            tracing::debug!(key = %settled.key, "discarding precondition of unmounted route");
            return Some(Settlement::Discarded(settled.key));
        };

        if let Some(on_mount) = &gate.hooks.on_mount {
            on_mount(&gate.snapshot);
        }
        gate.state = GateState::Resolved;

        Some(Settlement::Resolved(settled.key))
    }

    /// State of a mounted instance.
    pub fn state(&self, key: &RouteKey) -> Option<GateState> {
        self.gates.get(key).map(|gate| gate.state)
    }

    /// Whether an instance is mounted.
    pub fn is_mounted(&self, key: &RouteKey) -> bool {
        self.gates.contains_key(key)
    }

    /// Number of mounted instances.
    pub fn mounted(&self) -> usize {
        self.gates.len()
    }

    /// Number of preconditions not yet observed as settled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl fmt::Debug for GateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateRegistry")
            .field("mounted", &self.gates.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}
