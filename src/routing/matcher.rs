//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Parse pattern strings (`/users/:user_id/stream`, `/:catchAll(.*)`)
//! - Match a normalized route path segment by segment
//! - Rebuild a path from a pattern and parameter values
//!
//! # Design Decisions
//! - Literal segments are case-sensitive
//! - Parameters must capture a non-empty segment
//! - Only `(.*)` is accepted as a custom expression, and only on the last segment
//! - No regex: matching is a single pass over the segments

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Captured parameters, keyed by name.
pub type Params = BTreeMap<String, String>;

/// Name used for a bare `*` wildcard segment.
pub const WILDCARD_PARAM: &str = "pathMatch";

const CATCH_ALL_SUFFIX: &str = "(.*)";

/// Errors raised while compiling a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern must start with '/'")]
    MissingLeadingSlash,

    #[error("empty segment at position {0}")]
    EmptySegment(usize),

    #[error("parameter at position {0} has no name")]
    EmptyParamName(usize),

    #[error("invalid parameter name `{0}`")]
    InvalidParamName(String),

    #[error("parameter `{0}` appears more than once")]
    DuplicateParam(String),

    #[error("unsupported expression in segment `{0}` (only `(.*)` is allowed)")]
    UnsupportedExpression(String),

    #[error("wildcard `{0}` must be the last segment")]
    WildcardNotLast(String),

    #[error("segment `{0}` mixes literal text with a parameter")]
    MixedSegment(String),
}

/// A single compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text that must match exactly.
    Static(String),
    /// Captures one non-empty path segment.
    Param(String),
    /// Captures the rest of the path, zero or more segments.
    CatchAll(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern string.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let body = raw
            .strip_prefix('/')
            .ok_or(PatternError::MissingLeadingSlash)?;
        if body.starts_with('/') {
            return Err(PatternError::EmptySegment(0));
        }
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = Vec::new();
        if !body.is_empty() {
            let parts: Vec<&str> = body.split('/').collect();
            let last = parts.len() - 1;
            for (position, part) in parts.into_iter().enumerate() {
                let segment = parse_segment(position, part)?;
                if let Segment::CatchAll(name) = &segment {
                    if position != last {
                        return Err(PatternError::WildcardNotLast(name.clone()));
                    }
                }
                segments.push(segment);
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for segment in &segments {
            if let Segment::Param(name) | Segment::CatchAll(name) = segment {
                if seen.contains(&name.as_str()) {
                    return Err(PatternError::DuplicateParam(name.clone()));
                }
                seen.push(name);
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True if the pattern ends in a wildcard segment.
    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// True if the pattern is a lone wildcard and therefore matches every path.
    pub fn is_total(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::CatchAll(_)])
    }

    /// Names of all parameters, in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) | Segment::CatchAll(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match a normalized route path (see [`normalize_path`]).
    ///
    /// Returns the captured parameters, or `None` if the path does not match.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = path_segments(path);
        let mut params = Params::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(literal) => {
                    if parts.get(i) != Some(&literal.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = parts.get(i).filter(|v| !v.is_empty())?;
                    params.insert(name.clone(), decode(value));
                }
                Segment::CatchAll(name) => {
                    let rest = parts.get(i..).unwrap_or_default().join("/");
                    params.insert(name.clone(), decode(&rest));
                    return Some(params);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }

    /// Build a route path from parameter values.
    ///
    /// Parameter values are percent-encoded; a wildcard value is inserted
    /// with its `/` separators intact. Returns the name of the first missing
    /// parameter on failure.
    pub fn reverse(&self, params: &Params) -> Result<String, String> {
        let mut path = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(literal) => {
                    path.push('/');
                    path.push_str(literal);
                }
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| name.clone())?;
                    path.push('/');
                    path.push_str(&urlencoding::encode(value));
                }
                Segment::CatchAll(name) => {
                    let value = params.get(name).map(String::as_str).unwrap_or("");
                    let encoded: Vec<String> = value
                        .trim_start_matches('/')
                        .split('/')
                        .map(|part| urlencoding::encode(part).into_owned())
                        .collect();
                    path.push('/');
                    path.push_str(&encoded.join("/"));
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segment(position: usize, part: &str) -> Result<Segment, PatternError> {
    if part.is_empty() {
        return Err(PatternError::EmptySegment(position));
    }
    if part == "*" {
        return Ok(Segment::CatchAll(WILDCARD_PARAM.to_string()));
    }

    if let Some(param) = part.strip_prefix(':') {
        let (name, catch_all) = match param.strip_suffix(CATCH_ALL_SUFFIX) {
            Some(name) => (name, true),
            None => (param, false),
        };
        if name.contains('(') || name.contains(')') {
            return Err(PatternError::UnsupportedExpression(part.to_string()));
        }
        if name.is_empty() {
            return Err(PatternError::EmptyParamName(position));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PatternError::InvalidParamName(name.to_string()));
        }
        return Ok(if catch_all {
            Segment::CatchAll(name.to_string())
        } else {
            Segment::Param(name.to_string())
        });
    }

    if part.contains([':', '*', '(', ')']) {
        return Err(PatternError::MixedSegment(part.to_string()));
    }
    Ok(Segment::Static(part.to_string()))
}

/// Split a request target into route path, query and fragment.
///
/// The returned path is normalized with [`normalize_path`].
pub fn split_target(target: &str) -> (String, Option<&str>, Option<&str>) {
    let (rest, fragment) = match target.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (target, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    (normalize_path(path), query, fragment)
}

/// Ensure a leading `/` and drop one trailing `/` (root stays `/`).
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(path);
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Parse a query string into parameters; the last value of a repeated key wins.
pub fn parse_query(query: &str) -> Params {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

fn path_segments(path: &str) -> Vec<&str> {
    match path.strip_prefix('/').unwrap_or(path) {
        "" => Vec::new(),
        body => body.split('/').collect(),
    }
}

fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_segments() {
        let pattern = PathPattern::parse("/users/:user_id/stream").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Static("users".into()),
                Segment::Param("user_id".into()),
                Segment::Static("stream".into()),
            ]
        );
        assert!(!pattern.has_wildcard());

        let root = PathPattern::parse("/").unwrap();
        assert!(root.segments().is_empty());

        let catch_all = PathPattern::parse("/:catchAll(.*)").unwrap();
        assert!(catch_all.is_total());
        assert_eq!(catch_all.param_names().collect::<Vec<_>>(), ["catchAll"]);

        let star = PathPattern::parse("/*").unwrap();
        assert_eq!(star.segments(), &[Segment::CatchAll(WILDCARD_PARAM.into())]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            PathPattern::parse("users"),
            Err(PatternError::MissingLeadingSlash)
        );
        assert_eq!(
            PathPattern::parse("/users//stream"),
            Err(PatternError::EmptySegment(1))
        );
        assert_eq!(PathPattern::parse("//"), Err(PatternError::EmptySegment(0)));
        assert_eq!(
            PathPattern::parse("/users/:"),
            Err(PatternError::EmptyParamName(1))
        );
        assert_eq!(
            PathPattern::parse("/users/:user-id"),
            Err(PatternError::InvalidParamName("user-id".into()))
        );
        assert_eq!(
            PathPattern::parse("/:id/x/:id"),
            Err(PatternError::DuplicateParam("id".into()))
        );
        assert_eq!(
            PathPattern::parse("/users/:id(\\d+)"),
            Err(PatternError::UnsupportedExpression(":id(\\d+)".into()))
        );
        assert_eq!(
            PathPattern::parse("/:rest(.*)/edit"),
            Err(PatternError::WildcardNotLast("rest".into()))
        );
        assert_eq!(
            PathPattern::parse("/file.:ext"),
            Err(PatternError::MixedSegment("file.:ext".into()))
        );
    }

    #[test]
    fn test_static_match_is_exact() {
        let pattern = PathPattern::parse("/session").unwrap();
        assert_eq!(pattern.matches("/session"), Some(Params::new()));
        assert_eq!(pattern.matches("/Session"), None);
        assert_eq!(pattern.matches("/session/extra"), None);
        assert_eq!(pattern.matches("/"), None);
    }

    #[test]
    fn test_param_capture() {
        let pattern = PathPattern::parse("/users/:user_id/stream").unwrap();
        assert_eq!(
            pattern.matches("/users/42/stream"),
            Some(params(&[("user_id", "42")]))
        );
        assert_eq!(
            pattern.matches("/users/j%C3%BCrgen/stream"),
            Some(params(&[("user_id", "jürgen")]))
        );
        assert_eq!(pattern.matches("/users//stream"), None);
        assert_eq!(pattern.matches("/users/42"), None);
    }

    #[test]
    fn test_catch_all_capture() {
        let pattern = PathPattern::parse("/:catchAll(.*)").unwrap();
        assert_eq!(
            pattern.matches("/does/not/exist"),
            Some(params(&[("catchAll", "does/not/exist")]))
        );
        assert_eq!(pattern.matches("/"), Some(params(&[("catchAll", "")])));

        let nested = PathPattern::parse("/files/*").unwrap();
        assert_eq!(
            nested.matches("/files"),
            Some(params(&[(WILDCARD_PARAM, "")]))
        );
        assert_eq!(
            nested.matches("/files/a/b.txt"),
            Some(params(&[(WILDCARD_PARAM, "a/b.txt")]))
        );
        assert_eq!(nested.matches("/other/a"), None);
    }

    #[test]
    fn test_reverse() {
        let pattern = PathPattern::parse("/users/:user_id/user_profile").unwrap();
        assert_eq!(
            pattern.reverse(&params(&[("user_id", "a b")])),
            Ok("/users/a%20b/user_profile".to_string())
        );
        assert_eq!(pattern.reverse(&Params::new()), Err("user_id".to_string()));

        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.reverse(&Params::new()), Ok("/".to_string()));

        let catch_all = PathPattern::parse("/:catchAll(.*)").unwrap();
        assert_eq!(
            catch_all.reverse(&params(&[("catchAll", "a/b")])),
            Ok("/a/b".to_string())
        );
    }

    #[test]
    fn test_split_target() {
        assert_eq!(
            split_target("/users/42/stream/?tab=photos#top"),
            ("/users/42/stream".to_string(), Some("tab=photos"), Some("top"))
        );
        assert_eq!(split_target("session"), ("/session".to_string(), None, None));
        assert_eq!(split_target(""), ("/".to_string(), None, None));
    }

    #[test]
    fn test_parse_query_last_wins() {
        assert_eq!(
            parse_query("a=1&b=x%20y&a=2"),
            params(&[("a", "2"), ("b", "x y")])
        );
    }
}
