//! Core abstractions for the Trellis route-tree resolver.
//!
//! This crate provides the fundamental types shared by the decorator,
//! the resolver and the lifecycle gate:
//! - `concat_paths` and friends - Path utilities
//! - `RouteId` / `RouteKey` - Route identity
//! - `Location` - Navigation targets
//! - `Route` - Declarative route configuration
//! - `RenderProps` - Frozen props handed to components and hooks
//! - `RouterError` - Configuration and navigation errors

mod error;
mod identity;
mod location;
pub mod path;
mod props;
mod route;

pub use error::*;
pub use identity::*;
pub use location::*;
pub use path::{concat_paths, is_absolute, is_root_path, resolve_target, DEFAULT_REDIRECT, ROOT_PATH};
pub use props::*;
pub use route::*;
