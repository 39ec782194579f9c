//! Route table and path resolution.
//!
//! # Responsibilities
//! - Compile route definitions into an immutable table
//! - Reject malformed tables at construction
//! - Resolve a path to the first matching route
//! - Build paths for named routes
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order, first match wins
//! - The catch-all is stored apart from the ordered routes, so resolution is total

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use super::matcher::{parse_query, split_target, Params, PathPattern, PatternError};

/// A route declaration, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef<V> {
    pub pattern: String,
    pub view: V,
    pub name: Option<String>,
}

impl<V> RouteDef<V> {
    pub fn new(pattern: impl Into<String>, view: V) -> Self {
        Self {
            pattern: pattern.into(),
            view,
            name: None,
        }
    }

    /// Attach a name for reverse lookups.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Defects found while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route table is empty")]
    Empty,

    #[error("route {index} `{pattern}`: {source}")]
    Pattern {
        index: usize,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("route {index} `{pattern}` has a wildcard but is not the last route")]
    MisplacedCatchAll { index: usize, pattern: String },

    #[error("last route `{pattern}` must be a lone wildcard such as `/:catchAll(.*)`")]
    MissingCatchAll { pattern: String },

    #[error("route name `{0}` is used more than once")]
    DuplicateName(String),
}

/// Errors from building a path for a named route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` needs parameter `{param}`")]
    MissingParameter { route: String, param: String },
}

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route<V> {
    pattern: PathPattern,
    view: V,
    name: Option<String>,
}

impl<V> Route<V> {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// The outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution<V> {
    /// Normalized route path, without query or fragment.
    pub path: String,
    pub view: V,
    pub params: Params,
    pub query: Params,
    pub fragment: Option<String>,
    /// Name of the matched route, if it has one.
    pub name: Option<String>,
    /// Position of the matched route in the table.
    pub route_index: usize,
    /// True when only the catch-all matched.
    pub fallback: bool,
}

impl<V> Resolution<V> {
    /// Same route and same parameters; query and fragment are ignored.
    pub fn same_route(&self, other: &Resolution<V>) -> bool {
        self.route_index == other.route_index && self.params == other.params
    }

    /// Path with query and fragment re-attached.
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            full.push('?');
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            full.push_str(&query);
        }
        if let Some(fragment) = &self.fragment {
            full.push('#');
            full.push_str(fragment);
        }
        full
    }
}

/// Ordered, immutable route table.
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
    fallback: Route<V>,
}

impl<V: fmt::Debug> fmt::Debug for RouteTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.len())
            .field("fallback", &self.fallback.pattern.as_str())
            .finish()
    }
}

impl<V: Clone> RouteTable<V> {
    /// Compile a table. Every defect is reported, not just the first.
    pub fn new(defs: Vec<RouteDef<V>>) -> Result<Self, Vec<RouteError>> {
        if defs.is_empty() {
            return Err(vec![RouteError::Empty]);
        }

        let mut errors = Vec::new();
        let mut names = HashSet::new();
        let mut compiled = Vec::with_capacity(defs.len());
        let last = defs.len() - 1;

        for (index, def) in defs.into_iter().enumerate() {
            if let Some(name) = &def.name {
                if !names.insert(name.clone()) {
                    errors.push(RouteError::DuplicateName(name.clone()));
                }
            }

            let pattern = match PathPattern::parse(&def.pattern) {
                Ok(pattern) => pattern,
                Err(source) => {
                    errors.push(RouteError::Pattern {
                        index,
                        pattern: def.pattern,
                        source,
                    });
                    continue;
                }
            };

            if index == last {
                if !pattern.is_total() {
                    errors.push(RouteError::MissingCatchAll {
                        pattern: def.pattern.clone(),
                    });
                }
            } else if pattern.has_wildcard() {
                errors.push(RouteError::MisplacedCatchAll {
                    index,
                    pattern: def.pattern.clone(),
                });
            }

            compiled.push(Route {
                pattern,
                view: def.view,
                name: def.name,
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Non-empty and error-free, so the last compiled route is the catch-all.
        let fallback = compiled.pop().ok_or_else(|| vec![RouteError::Empty])?;

        tracing::debug!(
            routes = compiled.len() + 1,
            fallback = %fallback.pattern,
            "Route table compiled"
        );

        Ok(Self {
            routes: compiled,
            fallback,
        })
    }

    /// Resolve a path to the first matching route.
    ///
    /// Never fails: paths no declared route matches resolve to the catch-all.
    pub fn resolve(&self, target: &str) -> Resolution<V> {
        let (path, query, fragment) = split_target(target);

        let matched = self
            .routes
            .iter()
            .enumerate()
            .find_map(|(index, route)| route.pattern.matches(&path).map(|p| (index, route, p)));

        let (route_index, route, params, fallback) = match matched {
            Some((index, route, params)) => (index, route, params, false),
            None => {
                let params = self.fallback.pattern.matches(&path).unwrap_or_default();
                (self.routes.len(), &self.fallback, params, true)
            }
        };

        tracing::trace!(
            path = %path,
            route = %route.pattern,
            fallback,
            "Resolved path"
        );

        Resolution {
            path,
            view: route.view.clone(),
            params,
            query: query.map(parse_query).unwrap_or_default(),
            fragment: fragment.map(str::to_string),
            name: route.name.clone(),
            route_index,
            fallback,
        }
    }

    /// Build the route path for a named route.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, ReverseError> {
        let route = self
            .routes()
            .find(|r| r.name() == Some(name))
            .ok_or_else(|| ReverseError::UnknownRoute(name.to_string()))?;

        route
            .pattern
            .reverse(params)
            .map_err(|param| ReverseError::MissingParameter {
                route: name.to_string(),
                param,
            })
    }
}

impl<V> RouteTable<V> {
    /// All routes in declaration order, catch-all last.
    pub fn routes(&self) -> impl Iterator<Item = &Route<V>> {
        self.routes.iter().chain(std::iter::once(&self.fallback))
    }

    /// The catch-all route.
    pub fn fallback(&self) -> &Route<V> {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.routes.len() + 1
    }

    /// Always false; a compiled table holds at least the catch-all.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new(vec![
            RouteDef::new("/", "home").named("home"),
            RouteDef::new("/users/:id", "user").named("user"),
            RouteDef::new("/users/:id/posts/:post", "post"),
            RouteDef::new("/:catchAll(.*)", "error"),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new(vec![
            RouteDef::new("/users/:id", "by-id"),
            RouteDef::new("/users/me", "me"),
            RouteDef::new("/*", "error"),
        ])
        .unwrap();

        assert_eq!(table.resolve("/users/me").view, "by-id");
    }

    #[test]
    fn test_resolve_params_and_query() {
        let res = table().resolve("/users/7/posts/9?sort=new#c1");
        assert_eq!(res.view, "post");
        assert_eq!(res.params.get("id").map(String::as_str), Some("7"));
        assert_eq!(res.params.get("post").map(String::as_str), Some("9"));
        assert_eq!(res.query.get("sort").map(String::as_str), Some("new"));
        assert_eq!(res.fragment.as_deref(), Some("c1"));
        assert_eq!(res.route_index, 2);
        assert!(!res.fallback);
        assert_eq!(res.full_path(), "/users/7/posts/9?sort=new#c1");
    }

    #[test]
    fn test_trailing_slash_ignored() {
        assert_eq!(table().resolve("/users/7/").view, "user");
    }

    #[test]
    fn test_fallback() {
        let res = table().resolve("/users");
        assert_eq!(res.view, "error");
        assert!(res.fallback);
        assert_eq!(res.route_index, 3);
        assert_eq!(res.params.get("catchAll").map(String::as_str), Some("users"));
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = RouteTable::<&str>::new(Vec::new()).unwrap_err();
        assert_eq!(err, vec![RouteError::Empty]);
    }

    #[test]
    fn test_rejects_missing_catch_all() {
        let err = RouteTable::new(vec![
            RouteDef::new("/", "home"),
            RouteDef::new("/session", "login"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            vec![RouteError::MissingCatchAll {
                pattern: "/session".into()
            }]
        );
    }

    #[test]
    fn test_rejects_nested_wildcard_as_catch_all() {
        let err = RouteTable::new(vec![
            RouteDef::new("/", "home"),
            RouteDef::new("/files/:rest(.*)", "files"),
        ])
        .unwrap_err();
        assert!(matches!(err[0], RouteError::MissingCatchAll { .. }));
    }

    #[test]
    fn test_reports_all_defects() {
        let err = RouteTable::new(vec![
            RouteDef::new("/:a(.*)", "first").named("x"),
            RouteDef::new("nope", "bad").named("x"),
            RouteDef::new("/:b(.*)", "last"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            vec![
                RouteError::MisplacedCatchAll {
                    index: 0,
                    pattern: "/:a(.*)".into()
                },
                RouteError::DuplicateName("x".into()),
                RouteError::Pattern {
                    index: 1,
                    pattern: "nope".into(),
                    source: PatternError::MissingLeadingSlash,
                },
            ]
        );
    }

    #[test]
    fn test_href() {
        let table = table();
        let mut params = Params::new();
        assert_eq!(table.href("home", &params), Ok("/".to_string()));

        assert_eq!(
            table.href("user", &params),
            Err(ReverseError::MissingParameter {
                route: "user".into(),
                param: "id".into()
            })
        );

        params.insert("id".into(), "42".into());
        assert_eq!(table.href("user", &params), Ok("/users/42".to_string()));
        assert_eq!(
            table.href("missing", &params),
            Err(ReverseError::UnknownRoute("missing".into()))
        );
    }

    #[test]
    fn test_routes_in_order() {
        let table = table();
        let patterns: Vec<&str> = table.routes().map(|r| r.pattern().as_str()).collect();
        assert_eq!(patterns, ["/", "/users/:id", "/users/:id/posts/:post", "/:catchAll(.*)"]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.fallback().view(), &"error");
    }
}
