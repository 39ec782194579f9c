//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::{default_routes, RouteDef};
use crate::view::View;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// History mode, base prefix and entry path.
    pub history: HistoryConfig,

    /// Route declarations, in matching order. The last must be the catch-all.
    pub routes: Vec<RouteConfig>,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Inspection server settings.
    pub server: ServerConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            routes: default_routes().into_iter().map(RouteConfig::from).collect(),
            observability: ObservabilityConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// How route paths are carried in the browser URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Route path lives in the fragment (`/#/users/42/stream`).
    #[default]
    Hash,
    /// Route path is the URL path under the base (`/app/users/42/stream`).
    Web,
}

/// History configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub mode: HistoryMode,

    /// Deployment base path (e.g., "/" or "/app/").
    pub base: String,

    /// Path resolved when the application starts.
    pub entry: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            mode: HistoryMode::Hash,
            base: "/".to_string(),
            entry: "/".to_string(),
        }
    }
}

/// A single route declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern (e.g., "/users/:user_id/stream").
    pub path: String,

    /// View rendered for this route.
    pub view: View,

    /// Optional name for reverse lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<RouteDef<View>> for RouteConfig {
    fn from(def: RouteDef<View>) -> Self {
        Self {
            path: def.pattern,
            view: def.view,
            name: def.name,
        }
    }
}

impl From<RouteConfig> for RouteDef<View> {
    fn from(route: RouteConfig) -> Self {
        Self {
            pattern: route.path,
            view: route.view,
            name: route.name,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Inspection server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}
