//! Declarative nested route trees.
//!
//! Routes are configured as a tree of [`Route`]s. The router decorates the
//! tree once (absolute paths, derived `exact`, a fallback redirect closing
//! every level) and then renders it against a location:
//!
//! ```text
//! /                      -> Home
//! /account               -> Account        (pre: load session)
//!   /account/orders      -> Orders
//!   /account/*           -> redirect to the level's fallback
//! /*                     -> redirect to /404
//! ```
//!
//! # Usage
//!
//! ```
//! use trellis_router::prelude::*;
//!
//! let routes = vec![
//!     Route::new("/").component(|_, _| "Home".to_string()),
//!     Route::new("/account")
//!         .component(|_, children: Option<String>| format!("Account[{}]", children.unwrap_or_default()))
//!         .child(Route::new("/orders").component(|_, _| "Orders".to_string())),
//! ];
//!
//! let mut router = Router::new(routes, StaticMarkup).unwrap();
//! assert_eq!(router.navigate("/account/orders").unwrap(), "Account[Orders]");
//! ```

mod config;
mod decorate;
mod history;
mod host;
mod manifest;
pub mod matcher;
pub mod prelude;
mod render;
mod resolve;
mod router;
mod tree;

pub use config::*;
pub use decorate::decorate;
pub use history::*;
pub use host::*;
pub use manifest::*;
pub use matcher::{match_path, MatchOptions};
pub use resolve::*;
pub use router::*;
pub use tree::*;

pub use trellis_core::{
    Component, Hook, Location, Params, PathMatch, PreFn, RedirectSpec, RenderProps, Result,
    Route, RouteId, RouteInfo, RouteKey, RouterError,
};
pub use trellis_lifecycle::{FallbackPlan, GateState};
