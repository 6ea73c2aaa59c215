//! Request-target parsing.
//!
//! # Responsibilities
//! - Reject targets that are empty, relative, or contain `..`
//! - Split the path into non-empty segments
//! - Split the query string into a key/value map
//!
//! # Design Decisions
//! - The `..` guard applies to the whole target, query included
//! - Pairs without `=` are dropped; the last duplicate key wins
//! - No percent-decoding: segments are matched byte-for-byte

use std::collections::HashMap;
use std::str::FromStr;

use crate::routing::error::RouteError;

/// A request target split into path segments and query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTarget {
    pub segments: Vec<String>,
    pub query: HashMap<String, String>,
}

impl ParsedTarget {
    /// Segments as string slices, for matching.
    pub fn segments(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }

    /// Value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

impl FromStr for ParsedTarget {
    type Err = RouteError;

    fn from_str(target: &str) -> Result<Self, Self::Err> {
        parse_target(target)
    }
}

/// Parse a raw `path[?query]` target.
pub fn parse_target(target: &str) -> Result<ParsedTarget, RouteError> {
    if !target.starts_with('/') || target.contains("..") {
        return Err(RouteError::InvalidTarget);
    }

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };

    let segments = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    let query = query
        .into_iter()
        .flat_map(|query| query.split('&'))
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    Ok(ParsedTarget { segments, query })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_empty_segments_and_malformed_pairs() {
        let parsed = parse_target("/a//b/?x=1&x=2&y").unwrap();
        assert_eq!(parsed.segments(), ["a", "b"]);
        assert_eq!(parsed.query.len(), 1);
        assert_eq!(parsed.query_param("x"), Some("2"));
        assert_eq!(parsed.query_param("y"), None);
    }

    #[test]
    fn root_has_no_segments() {
        assert_eq!(parse_target("/").unwrap(), ParsedTarget::default());
        assert_eq!(parse_target("///").unwrap(), ParsedTarget::default());
    }

    #[test]
    fn rejects_illegal_targets() {
        for target in ["", "api/items", "*", "/a/../b", "/a/b?next=..", "/.."] {
            assert_eq!(parse_target(target), Err(RouteError::InvalidTarget), "{target}");
        }
    }

    #[test]
    fn value_may_contain_equals() {
        let parsed = parse_target("/search?q=a=b&empty=").unwrap();
        assert_eq!(parsed.query_param("q"), Some("a=b"));
        assert_eq!(parsed.query_param("empty"), Some(""));
    }

    #[test]
    fn empty_key_is_kept() {
        let parsed = parse_target("/x?=v&&k=1").unwrap();
        assert_eq!(parsed.query_param(""), Some("v"));
        assert_eq!(parsed.query_param("k"), Some("1"));
    }

    #[test]
    fn question_mark_splits_once() {
        let parsed: ParsedTarget = "/api/items?a=1?b=2".parse().unwrap();
        assert_eq!(parsed.segments(), ["api", "items"]);
        assert_eq!(parsed.query_param("a"), Some("1?b=2"));
    }

    #[test]
    fn single_dot_segments_are_allowed() {
        let parsed = parse_target("/./a.b").unwrap();
        assert_eq!(parsed.segments(), [".", "a.b"]);
    }
}
