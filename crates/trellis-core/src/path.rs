//! Path utilities.
//!
//! Route paths are joined with exactly one separator between a base and a
//! segment. These helpers never allocate more than the joined string.

/// The root path marker.
pub const ROOT_PATH: &str = "/";

/// Redirect target used when no level configures its own catch-all.
pub const DEFAULT_REDIRECT: &str = "/404";

/// Join `base` and `path` with a single separator.
///
/// One trailing slash is stripped from `base` and one leading slash from
/// `path`. Missing values are treated as empty strings.
///
/// ```
/// use trellis_core::concat_paths;
///
/// assert_eq!(concat_paths("/a/", "/b"), "/a/b");
/// assert_eq!(concat_paths("/a", "b"), "/a/b");
/// assert_eq!(concat_paths("", ""), "/");
/// ```
pub fn concat_paths(base: &str, path: &str) -> String {
    let base = base.strip_suffix(ROOT_PATH).unwrap_or(base);
    let path = path.strip_prefix(ROOT_PATH).unwrap_or(path);

    let mut joined = String::with_capacity(base.len() + path.len() + 1);
    joined.push_str(base);
    joined.push_str(ROOT_PATH);
    joined.push_str(path);
    joined
}

/// Whether `path` starts with the root separator.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(ROOT_PATH)
}

/// Whether `path` is the root marker itself.
pub fn is_root_path(path: &str) -> bool {
    path == ROOT_PATH
}

/// Resolve a redirect source or target against `base`.
///
/// Absolute targets are taken literally, relative ones are appended to
/// `base`.
pub fn resolve_target(base: &str, target: &str) -> String {
    if is_absolute(target) {
        target.to_string()
    } else {
        concat_paths(base, target)
    }
}
