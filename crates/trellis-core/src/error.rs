//! Error types for Trellis.

use thiserror::Error;

/// Errors raised while decorating or navigating a route tree.
///
/// Unrenderable nodes and unmatched paths are not errors; they degrade to
/// rendering nothing or to a fallback redirect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A redirect node also carries content fields.
    #[error(
        "No other properties are allowed alongside \"redirect\" in route configuration. Check childRoutes of \"{base_path}\""
    )]
    RedirectWithContent { base_path: String },

    /// A root-path node declares children.
    #[error(
        "Routes with path \"/\" cannot have childRoutes; move them up a level. Check childRoutes of \"{base_path}\""
    )]
    RootPathWithChildren { base_path: String },

    /// Redirects kept firing without settling on a location.
    #[error("Redirect loop detected at \"{path}\" after {hops} redirects")]
    RedirectLoop { path: String, hops: usize },

    /// A manifest names a component that was never registered.
    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    /// A route manifest could not be parsed.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Router configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias for router operations.
pub type Result<T, E = RouterError> = std::result::Result<T, E>;

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        RouterError::Manifest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_with_content_names_base_path() {
        let err = RouterError::RedirectWithContent {
            base_path: "/house/car".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("alongside \"redirect\""));
        assert!(message.ends_with("Check childRoutes of \"/house/car\""));
    }

    #[test]
    fn test_redirect_loop_message() {
        let err = RouterError::RedirectLoop {
            path: "/a".to_string(),
            hops: 16,
        };
        assert_eq!(
            err.to_string(),
            "Redirect loop detected at \"/a\" after 16 redirects"
        );
    }

    #[test]
    fn test_json_error_maps_to_manifest() {
        let err: RouterError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, RouterError::Manifest(_)));
    }
}
