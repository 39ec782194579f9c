//! Observability subsystem.
//!
//! All subsystems emit `tracing` events with structured fields:
//! route table compilation, resolutions (trace), navigations and
//! listener changes (debug), server lifecycle (info).

pub mod logging;

pub use logging::init_logging;
