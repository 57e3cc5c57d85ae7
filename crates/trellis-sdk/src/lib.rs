//! Public SDK for Trellis route trees.
//!
//! This crate re-exports all Trellis functionality:
//!
//! ```
//! use trellis_sdk::prelude::*;
//!
//! let routes = vec![
//!     Route::new("/login").component(|_, _| "Login".to_string()),
//!     Route::redirect("/login"),
//! ];
//!
//! let mut router = Router::new(routes, StaticMarkup).unwrap();
//! assert_eq!(router.navigate("/admin").unwrap(), "Login");
//! assert_eq!(router.location().pathname, "/login");
//! ```

pub use trellis_core;
pub use trellis_lifecycle;
pub use trellis_observability;
pub use trellis_router;

/// Prelude for convenient imports.
pub mod prelude {
    pub use trellis_core::*;
    pub use trellis_lifecycle::*;
    pub use trellis_observability::*;
    pub use trellis_router::*;
}
