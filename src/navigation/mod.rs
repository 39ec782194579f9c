//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! Shell event (link click, hash change)
//!     → navigator.rs (resolve, update history + current resolution)
//!     → listeners.rs (notify in registration order)
//!     → Shell swaps the active view
//! ```
//!
//! The shell talks to a [`NavigationProvider`], so view code can be tested
//! against the route table without a browser.

pub mod listeners;
pub mod navigator;

pub use listeners::{ChangeCallback, RouteChange, Subscription};
pub use navigator::{NavigationOutcome, Navigator};

use crate::routing::Resolution;

/// The navigation surface the hosting shell depends on.
pub trait NavigationProvider<V> {
    /// Resolve a path without changing state.
    fn resolve(&self, path: &str) -> Resolution<V>;

    /// Navigate to a path and notify listeners if the route changed.
    fn navigate(&mut self, path: &str) -> NavigationOutcome;

    /// Register a change callback.
    fn on_change(&mut self, callback: ChangeCallback<V>) -> Subscription;

    /// The current resolution.
    fn current(&self) -> &Resolution<V>;
}

impl<V: Clone> NavigationProvider<V> for Navigator<V> {
    fn resolve(&self, path: &str) -> Resolution<V> {
        Navigator::resolve(self, path)
    }

    fn navigate(&mut self, path: &str) -> NavigationOutcome {
        Navigator::navigate(self, path)
    }

    fn on_change(&mut self, callback: ChangeCallback<V>) -> Subscription {
        self.subscribe(callback)
    }

    fn current(&self) -> &Resolution<V> {
        Navigator::current(self)
    }
}
