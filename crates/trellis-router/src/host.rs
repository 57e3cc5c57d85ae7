//! The rendering host.
//!
//! The router decides what renders; a [`Host`] decides what a view is.
//! Hosts supply the empty view, the view left behind by a redirect, and
//! optionally their own path matcher.

use trellis_core::{Location, PathMatch};

use crate::matcher::{self, MatchOptions};

/// Rendering primitives the router builds on.
pub trait Host {
    /// The rendered output type.
    type View;

    /// The empty view.
    fn nothing(&self) -> Self::View;

    /// View produced where a redirect fires. Navigation itself is performed
    /// by the router.
    fn redirect(&self, to: &Location) -> Self::View {
        let _ = to;
        self.nothing()
    }

    /// Match a pathname against a route pattern.
    fn match_path(&self, pathname: &str, pattern: &str, options: MatchOptions) -> Option<PathMatch> {
        matcher::match_path(pathname, pattern, options)
    }
}

/// Host rendering to plain strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMarkup;

impl Host for StaticMarkup {
    type View = String;

    fn nothing(&self) -> String {
        String::new()
    }
}
