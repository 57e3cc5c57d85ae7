//! Path pattern matching.
//!
//! Patterns are matched segment by segment, so `/root` never matches
//! `/rootx`. Supported segments:
//! - literals, case-insensitive unless `sensitive`
//! - `:name` parameters, which match one non-empty segment
//! - `:name?` optional parameters
//! - a trailing `*`, which captures the rest of the path as param `0`
//!
//! Without `strict`, one trailing slash on the pattern is ignored and one
//! trailing slash on the pathname is tolerated.

use trellis_core::{Params, PathMatch};

/// How a pattern is matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// The whole pathname must be consumed.
    pub exact: bool,
    /// Trailing slashes are significant.
    pub strict: bool,
    /// Literals are compared case-sensitively.
    pub sensitive: bool,
}

impl MatchOptions {
    pub fn exact() -> Self {
        Self {
            exact: true,
            ..Self::default()
        }
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
    Optional(&'a str),
    Wildcard,
}

impl<'a> Segment<'a> {
    fn parse(raw: &'a str) -> Self {
        if raw == "*" {
            return Self::Wildcard;
        }
        match raw.strip_prefix(':') {
            Some(name) => match name.strip_suffix('?') {
                Some(name) => Self::Optional(name),
                None => Self::Param(name),
            },
            None => Self::Literal(raw),
        }
    }
}

fn split(path: &str) -> Vec<&str> {
    match path.strip_prefix('/').unwrap_or(path) {
        "" => Vec::new(),
        body => body.split('/').collect(),
    }
}

/// Match `pathname` against `pattern`.
///
/// Returns `None` when the pattern does not match, or when `exact` is set
/// and the match leaves part of the pathname unconsumed.
pub fn match_path(pathname: &str, pattern: &str, options: MatchOptions) -> Option<PathMatch> {
    let trimmed = if options.strict || pattern.len() <= 1 {
        pattern
    } else {
        pattern.strip_suffix('/').unwrap_or(pattern)
    };

    let pattern_segments = split(trimmed);
    let path_segments = split(pathname);

    let mut params = Params::new();
    let mut consumed = 0;
    let mut needs_slash = false;

    for (i, raw) in pattern_segments.iter().enumerate() {
        let is_last = i + 1 == pattern_segments.len();

        match Segment::parse(raw) {
            // A strict pattern ending in `/` requires the slash to be present.
            Segment::Literal("") if is_last && options.strict => {
                if consumed >= path_segments.len() {
                    return None;
                }
                if path_segments[consumed].is_empty() {
                    consumed += 1;
                } else {
                    needs_slash = true;
                }
            }
            Segment::Literal(literal) => {
                let segment = path_segments.get(consumed)?;
                let equal = if options.sensitive {
                    *segment == literal
                } else {
                    segment.eq_ignore_ascii_case(literal)
                };
                if !equal {
                    return None;
                }
                consumed += 1;
            }
            Segment::Param(name) => {
                let segment = path_segments.get(consumed).filter(|s| !s.is_empty())?;
                params.insert(name.to_string(), segment.to_string());
                consumed += 1;
            }
            Segment::Optional(name) => {
                if let Some(segment) = path_segments.get(consumed).filter(|s| !s.is_empty()) {
                    params.insert(name.to_string(), segment.to_string());
                    consumed += 1;
                }
            }
            Segment::Wildcard => {
                let rest = path_segments.get(consumed..).unwrap_or_default().join("/");
                params.insert("0".to_string(), rest);
                consumed = path_segments.len();
            }
        }
    }

    if !options.strict
        && consumed + 1 == path_segments.len()
        && path_segments[consumed].is_empty()
    {
        consumed += 1;
    }

    let mut url = format!("/{}", path_segments[..consumed].join("/"));
    if needs_slash {
        url.push('/');
    }

    let is_exact = consumed == path_segments.len();
    if options.exact && !is_exact {
        return None;
    }

    Some(PathMatch {
        path: pattern.to_string(),
        url,
        is_exact,
        params,
    })
}
