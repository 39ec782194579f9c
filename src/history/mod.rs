//! History addressing subsystem.
//!
//! # Data Flow
//! ```text
//! Shell URL ("https://host/#/users/42/stream")
//!     → location.rs (mode + base → route path)
//!     → navigator resolves route path
//!
//! Navigation:
//!     route path → stack.rs (push / replace / go)
//!     route path → location.rs (href for links)
//! ```

pub mod location;
pub mod stack;

pub use location::{HistoryBase, LocationError};
pub use stack::HistoryStack;
