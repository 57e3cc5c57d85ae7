//! What to render while a route's precondition is outstanding.

use trellis_core::{Component, RenderProps};

/// How a pending route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPlan {
    /// Render the fallback on its own.
    Standalone,

    /// Render the component with the fallback as its child content.
    WrappedInComponent,

    /// No fallback configured; render nothing.
    #[default]
    Nothing,
}

impl FallbackPlan {
    /// Pick the plan for a route's configuration.
    pub fn for_route(has_fallback: bool, wrap_with_component: bool) -> Self {
        match (has_fallback, wrap_with_component) {
            (false, _) => Self::Nothing,
            (true, false) => Self::Standalone,
            (true, true) => Self::WrappedInComponent,
        }
    }
}

/// Apply a plan to produce the pending view.
///
/// Nested child routes are never rendered here: they wait for the
/// precondition like the primary content does.
pub fn render_fallback<V>(
    plan: FallbackPlan,
    component: Option<&Component<V>>,
    fallback: Option<&Component<V>>,
    props: &RenderProps,
    nothing: impl FnOnce() -> V,
) -> V {
    match (plan, component, fallback) {
        (FallbackPlan::WrappedInComponent, Some(component), Some(fallback)) => {
            let inner = fallback(props, None);
            component(props, Some(inner))
        }
        (FallbackPlan::WrappedInComponent | FallbackPlan::Standalone, _, Some(fallback)) => {
            fallback(props, None)
        }
        _ => nothing(),
    }
}
