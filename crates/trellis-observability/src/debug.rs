//! Debug side channel for decorated route trees.
//!
//! The dump is diagnostic only; its shape is not a stable contract.

use serde_json::Value;

use crate::logging::StructuredLogger;

/// Message attached to route-tree dumps.
pub const ROUTE_TREE_MESSAGE: &str = "trellis: debug: decorated routes";

/// Emit a decorated route tree through the logger.
///
/// Logged at info level so it shows up under the default level whenever
/// the router's debug flag is set.
pub fn log_route_tree(logger: &StructuredLogger, routes: Value) {
    let count = routes.as_array().map(|r| r.len()).unwrap_or(0);

    logger
        .info_builder(ROUTE_TREE_MESSAGE)
        .field_i64("top_level", count as i64)
        .field_json("routes", routes)
        .emit();
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::logging::{MemorySink, NavigationId};

    #[test]
    fn test_route_tree_dump() {
        let sink = MemorySink::new();
        let logger = StructuredLogger::new(NavigationId::next()).with_sink(Arc::new(sink.clone()));

        log_route_tree(
            &logger,
            serde_json::json!([
                {"path": "/one", "component": "[component]"},
                {"redirect": {"to": "/404"}}
            ]),
        );

        let value: Value = serde_json::from_str(&sink.lines()[0]).unwrap();
        assert_eq!(value["message"], ROUTE_TREE_MESSAGE);
        assert_eq!(value["top_level"], 2);
        assert_eq!(value["routes"][1]["redirect"]["to"], "/404");
    }
}
