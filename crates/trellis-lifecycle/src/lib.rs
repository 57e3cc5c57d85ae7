//! Lifecycle gating for matched routes.
//!
//! This crate decides whether a matched route shows its primary content or
//! its fallback:
//! - `GateRegistry` - Mounted route instances and their pending preconditions
//! - `MountToken` - Per-mount cancellation
//! - `FallbackPlan` - What to render while a precondition is outstanding

mod fallback;
mod gate;
mod token;

pub use fallback::*;
pub use gate::*;
pub use token::*;
