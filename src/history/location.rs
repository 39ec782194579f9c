//! Mapping between browser URLs and route paths.
//!
//! # Responsibilities
//! - Build the `href` the shell puts in links
//! - Extract the route path from a URL reported by the shell
//! - Strip the deployment base from raw paths
//!
//! # Design Decisions
//! - Hash mode keeps the base as-is and appends `#` + route path
//! - Web mode joins the base and the route path with a single `/`

use thiserror::Error;
use url::Url;

use crate::config::{HistoryConfig, HistoryMode};

/// Errors from interpreting a shell-reported URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("path `{path}` is outside base `{base}`")]
    OutsideBase { path: String, base: String },
}

/// Base prefix and history mode, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBase {
    mode: HistoryMode,
    /// Always starts and ends with `/`.
    base: String,
}

impl HistoryBase {
    pub fn new(mode: HistoryMode, base: &str) -> Self {
        let trimmed = base.trim_matches('/');
        let base = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}/")
        };
        Self { mode, base }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.mode, &config.base)
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// External URL for a route path.
    pub fn href(&self, route_path: &str) -> String {
        let route_path = if route_path.starts_with('/') {
            route_path.to_string()
        } else {
            format!("/{route_path}")
        };
        match self.mode {
            HistoryMode::Hash => format!("{}#{}", self.base, route_path),
            HistoryMode::Web => format!("{}{}", self.base.trim_end_matches('/'), route_path),
        }
    }

    /// Remove the base prefix from a raw path.
    ///
    /// `/app` and `/app/` both map to `/` under base `/app/`.
    pub fn strip(&self, path: &str) -> Result<String, LocationError> {
        let base_no_slash = self.base.trim_end_matches('/');
        if path == base_no_slash {
            return Ok("/".to_string());
        }
        match path.strip_prefix(base_no_slash) {
            Some(rest) if rest.starts_with('/') => Ok(rest.to_string()),
            _ => Err(LocationError::OutsideBase {
                path: path.to_string(),
                base: self.base.clone(),
            }),
        }
    }

    /// Route path, with query and fragment, carried by a URL.
    ///
    /// Accepts absolute URLs (`https://host/app/#/session`) and bare targets
    /// (`/app/#/session`).
    pub fn route_path(&self, url: &str) -> Result<String, LocationError> {
        let parsed = parse_url(url)?;
        match self.mode {
            HistoryMode::Hash => Ok(match parsed.fragment() {
                Some(fragment) if !fragment.is_empty() => fragment.to_string(),
                _ => "/".to_string(),
            }),
            HistoryMode::Web => {
                let mut route = self.strip(parsed.path())?;
                if let Some(query) = parsed.query() {
                    route.push('?');
                    route.push_str(query);
                }
                if let Some(fragment) = parsed.fragment() {
                    route.push('#');
                    route.push_str(fragment);
                }
                Ok(route)
            }
        }
    }
}

impl Default for HistoryBase {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}

fn parse_url(url: &str) -> Result<Url, LocationError> {
    let invalid = |e: url::ParseError| LocationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    };
    match Url::parse(url) {
        Ok(parsed) => Ok(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let origin = Url::parse("http://localhost/").map_err(invalid)?;
            origin.join(url).map_err(invalid)
        }
        Err(e) => Err(invalid(e)),
    }
}
