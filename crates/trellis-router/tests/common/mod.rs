#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use trellis_router::prelude::*;

/// A component rendering its name, followed by its children if any.
pub fn with_children(
    name: &'static str,
) -> impl Fn(&RenderProps, Option<String>) -> String + Send + Sync + 'static {
    move |_: &RenderProps, children: Option<String>| match children.filter(|c| !c.is_empty()) {
        Some(children) => format!("<div><div>{}</div><div>{}</div></div>", name, children),
        None => format!("<div><div>{}</div></div>", name),
    }
}

/// A component rendering fixed text.
pub fn text(
    value: &'static str,
) -> impl Fn(&RenderProps, Option<String>) -> String + Send + Sync + 'static {
    move |_: &RenderProps, _: Option<String>| value.to_string()
}

/// A precondition that resolves after `ms` milliseconds of tokio time.
pub fn sleep_pre(
    ms: u64,
) -> impl Fn(Arc<RenderProps>) -> tokio::time::Sleep + Send + Sync + 'static {
    move |_: Arc<RenderProps>| tokio::time::sleep(Duration::from_millis(ms))
}

pub fn router(routes: Vec<Route<String>>) -> Router<StaticMarkup> {
    Router::new(routes, StaticMarkup).expect("routes should decorate")
}

/// Navigate and return the rendered view.
pub fn render_at(routes: &[Route<String>], path: &str) -> (String, Router<StaticMarkup>) {
    let mut router = router(routes.to_vec());
    let view = router.navigate(path).expect("navigation should settle").clone();
    (view, router)
}

/// Shared event log for hooks.
#[derive(Clone, Default)]
pub struct Events(Arc<Mutex<Vec<String>>>);

impl Events {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}
