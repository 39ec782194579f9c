//! View identifiers.
//!
//! The router never renders a view. It hands one of these identifiers to the
//! hosting shell, which maps it to an actual renderable unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Views of the web UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum View {
    /// Welcome screen.
    Home,
    /// Login screen.
    Login,
    /// A user's photo stream.
    Stream,
    /// A user's profile page.
    UserProfile,
    /// Not-found / error screen.
    Error,
}

impl View {
    /// All views, in declaration order.
    pub const ALL: [View; 5] = [
        View::Home,
        View::Login,
        View::Stream,
        View::UserProfile,
        View::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Login => "Login",
            View::Stream => "Stream",
            View::UserProfile => "UserProfile",
            View::Error => "Error",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view: {0}")]
pub struct ViewParseError(pub String);

impl FromStr for View {
    type Err = ViewParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ViewParseError(s.to_string()))
    }
}
