//! Convenient re-exports for route configuration.
//!
//! ```rust,ignore
//! use trellis_router::prelude::*;
//! ```

pub use crate::{
    ComponentRegistry, Host, Location, RenderProps, Route, RouteManifest, Router, RouterConfig,
    RouterError, StaticMarkup,
};
