//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Requested path ("/users/42/stream?tab=photos")
//!     → matcher.rs (split off query/fragment, normalize)
//!     → router.rs (scan routes in order)
//!     → Return: Resolution { view, params, ... }
//!
//! Route Compilation (at startup):
//!     RouteDef[]
//!     → Compile patterns (matcher.rs)
//!     → Check table invariants (single trailing catch-all)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always resolves to the same route
//! - First match wins (declaration order)
//! - Total: the catch-all guarantees every path resolves

pub mod matcher;
pub mod router;

pub use matcher::{PathPattern, Params, PatternError, Segment};
pub use router::{Resolution, ReverseError, Route, RouteDef, RouteError, RouteTable};

use crate::view::View;

/// The web UI's route table.
pub fn default_routes() -> Vec<RouteDef<View>> {
    vec![
        RouteDef::new("/", View::Home).named("home"),
        RouteDef::new("/session", View::Login).named("session"),
        RouteDef::new("/users/:user_id/stream", View::Stream).named("stream"),
        RouteDef::new("/users/:user_id/user_profile", View::UserProfile).named("user-profile"),
        RouteDef::new("/:catchAll(.*)", View::Error).named("not-found"),
    ]
}
