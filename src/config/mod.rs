//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route table compilation)
//!     → RouterConfig (validated, immutable)
//!     → RouteTable shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults; an empty file yields the web UI's route table
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    HistoryConfig, HistoryMode, LogFormat, ObservabilityConfig, RouteConfig, RouterConfig,
    ServerConfig,
};
pub use validation::ValidationError;
