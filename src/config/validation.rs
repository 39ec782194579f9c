//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile the route table and surface every route defect
//! - Validate history paths and the server bind address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::{RouteDef, RouteError, RouteTable};
use crate::view::View;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    Route(#[from] RouteError),

    #[error("history.base `{0}` must start with '/'")]
    InvalidBase(String),

    #[error("history.entry `{0}` must start with '/'")]
    InvalidEntry(String),

    #[error("server.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let defs: Vec<RouteDef<View>> = config.routes.iter().cloned().map(Into::into).collect();
    if let Err(route_errors) = RouteTable::<View>::new(defs) {
        errors.extend(route_errors.into_iter().map(ValidationError::from));
    }

    if !config.history.base.starts_with('/') {
        errors.push(ValidationError::InvalidBase(config.history.base.clone()));
    }
    if !config.history.entry.starts_with('/') {
        errors.push(ValidationError::InvalidEntry(config.history.entry.clone()));
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.history.base = "app".into();
        config.server.bind_address = "localhost".into();
        config.server.request_timeout_secs = 0;
        config.routes.push(RouteConfig {
            path: "/late".into(),
            view: View::Home,
            name: None,
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::InvalidBase("app".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::Route(RouteError::MissingCatchAll {
            pattern: "/late".into()
        })));
        assert!(errors.contains(&ValidationError::Route(RouteError::MisplacedCatchAll {
            index: 4,
            pattern: "/:catchAll(.*)".into()
        })));
    }
}
