//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{RouteDef, RouteTable};
use crate::view::View;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), routes = config.routes.len(), "Configuration loaded");
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

impl RouterConfig {
    /// Compile the configured routes.
    pub fn route_table(&self) -> Result<RouteTable<View>, ConfigError> {
        let defs: Vec<RouteDef<View>> = self.routes.iter().cloned().map(Into::into).collect();
        RouteTable::new(defs).map_err(|errors| {
            ConfigError::Validation(errors.into_iter().map(ValidationError::from).collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::HistoryMode;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.history.mode, HistoryMode::Hash);
        assert_eq!(config.routes.len(), 5);
        assert_eq!(config.route_table().unwrap().len(), 5);
    }

    #[test]
    fn test_parse_routes() {
        let config = parse_config(
            r#"
            [history]
            mode = "web"
            base = "/app/"

            [[routes]]
            path = "/"
            view = "Home"

            [[routes]]
            path = "/users/:user_id/stream"
            view = "Stream"
            name = "stream"

            [[routes]]
            path = "/*"
            view = "Error"
            "#,
        )
        .unwrap();

        assert_eq!(config.history.mode, HistoryMode::Web);
        assert_eq!(config.history.base, "/app/");
        assert_eq!(config.history.entry, "/");

        let table = config.route_table().unwrap();
        assert_eq!(table.resolve("/users/3/stream").view, View::Stream);
        assert_eq!(table.resolve("/nowhere").view, View::Error);
    }

    #[test]
    fn test_unknown_view_is_parse_error() {
        let err = parse_config(
            r#"
            [[routes]]
            path = "/"
            view = "Dashboard"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config(
            r#"
            [[routes]]
            path = "/:a(.*)"
            view = "Error"

            [[routes]]
            path = "/:b(.*)"
            view = "Error"
            "#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation failed: route 0 `/:a(.*)` has a wildcard but is not the last route"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/webui-router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
