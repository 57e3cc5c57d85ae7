//! Observability infrastructure for Trellis.
//!
//! This crate provides:
//! - `NavigationId` - Correlates log lines of one navigation
//! - `StructuredLogger` - Structured logging with navigation context
//! - `LogSink` - Where log lines go (stderr, memory)
//! - `log_route_tree` - Debug side channel for decorated route trees

mod debug;
mod logging;

pub use debug::*;
pub use logging::*;
