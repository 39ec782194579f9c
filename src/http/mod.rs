//! HTTP inspection surface.
//!
//! # Data Flow
//! ```text
//! GET /resolve?path=/users/42/stream
//!     → server.rs (request ID, trace, timeout)
//!     → handlers.rs (RouteTable::resolve)
//!     → JSON resolution + href
//! ```
//!
//! Endpoints: `/health`, `/routes`, `/resolve?path=`, `/href/{name}?param=`.

pub mod handlers;
pub mod server;

pub use server::{build_router, AppState, InspectServer};
