//! The owned navigation state.
//!
//! # Responsibilities
//! - Hold the current resolution and the history stack
//! - Apply navigations (push, replace, traversal, shell URL sync)
//! - Notify listeners after the state is fully updated
//!
//! # Design Decisions
//! - One explicitly owned instance per shell, no ambient global
//! - Single-threaded: listeners may capture `Rc` state
//! - Listeners fire only when the view or params change

use std::sync::Arc;

use super::listeners::{ChangeCallback, Listeners, RouteChange, Subscription};
use crate::config::HistoryConfig;
use crate::history::{HistoryBase, HistoryStack, LocationError};
use crate::routing::{Params, Resolution, ReverseError, RouteTable};

/// What a navigation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The route or its params changed; listeners were notified.
    Changed,
    /// The location changed but view and params did not; no notification.
    Unchanged,
    /// The target is the current location; nothing happened.
    Duplicated,
}

/// Navigation state over a shared route table.
pub struct Navigator<V> {
    table: Arc<RouteTable<V>>,
    base: HistoryBase,
    stack: HistoryStack,
    current: Resolution<V>,
    listeners: Listeners<V>,
}

impl<V: Clone> Navigator<V> {
    /// Start at the configured entry path.
    pub fn new(table: Arc<RouteTable<V>>, history: &HistoryConfig) -> Self {
        Self::with_entry(table, HistoryBase::from_config(history), &history.entry)
    }

    pub fn with_entry(table: Arc<RouteTable<V>>, base: HistoryBase, entry: &str) -> Self {
        let current = table.resolve(entry);
        tracing::debug!(entry = %current.full_path(), mode = ?base.mode(), "Navigator started");
        Self {
            stack: HistoryStack::new(current.full_path()),
            table,
            base,
            current,
            listeners: Listeners::new(),
        }
    }

    pub fn current(&self) -> &Resolution<V> {
        &self.current
    }

    pub fn table(&self) -> &Arc<RouteTable<V>> {
        &self.table
    }

    pub fn history(&self) -> &HistoryStack {
        &self.stack
    }

    pub fn base(&self) -> &HistoryBase {
        &self.base
    }

    /// Resolve without navigating.
    pub fn resolve(&self, path: &str) -> Resolution<V> {
        self.table.resolve(path)
    }

    /// Navigate to `path`, pushing a history entry.
    pub fn navigate(&mut self, path: &str) -> NavigationOutcome {
        let next = self.table.resolve(path);
        if next.full_path() == self.current.full_path() {
            tracing::debug!(path = %next.path, "Navigation to current location ignored");
            return NavigationOutcome::Duplicated;
        }
        self.stack.push(next.full_path());
        self.commit(next)
    }

    /// Navigate to `path`, replacing the current history entry.
    pub fn replace(&mut self, path: &str) -> NavigationOutcome {
        let next = self.table.resolve(path);
        if next.full_path() == self.current.full_path() {
            return NavigationOutcome::Duplicated;
        }
        self.stack.replace(next.full_path());
        self.commit(next)
    }

    /// Move `delta` entries through history. `None` if out of range.
    pub fn go(&mut self, delta: isize) -> Option<NavigationOutcome> {
        let path = self.stack.go(delta)?.to_string();
        let next = self.table.resolve(&path);
        Some(self.commit(next))
    }

    pub fn back(&mut self) -> Option<NavigationOutcome> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<NavigationOutcome> {
        self.go(1)
    }

    /// Apply a URL reported by the shell (hash change or popstate).
    ///
    /// The browser owns that history entry, so the current entry is replaced.
    pub fn sync_url(&mut self, url: &str) -> Result<NavigationOutcome, LocationError> {
        let route_path = self.base.route_path(url)?;
        Ok(self.replace(&route_path))
    }

    /// External URL for a route path.
    pub fn href(&self, path: &str) -> String {
        self.base.href(path)
    }

    /// External URL for a named route.
    pub fn href_named(&self, name: &str, params: &Params) -> Result<String, ReverseError> {
        Ok(self.base.href(&self.table.href(name, params)?))
    }

    /// Register a change callback. Callbacks run in registration order.
    pub fn on_change<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&RouteChange<'_, V>) + 'static,
    {
        self.subscribe(Box::new(callback))
    }

    /// Register an already boxed callback.
    pub fn subscribe(&mut self, callback: ChangeCallback<V>) -> Subscription {
        self.listeners.subscribe(callback)
    }

    /// Number of active listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn commit(&mut self, next: Resolution<V>) -> NavigationOutcome {
        let previous = std::mem::replace(&mut self.current, next);
        if previous.same_route(&self.current) {
            tracing::debug!(path = %self.current.full_path(), "Location changed, route unchanged");
            return NavigationOutcome::Unchanged;
        }

        tracing::debug!(
            from = %previous.path,
            to = %self.current.path,
            fallback = self.current.fallback,
            "Route changed"
        );
        let change = RouteChange {
            from: &previous,
            to: &self.current,
        };
        self.listeners.dispatch(&change);
        NavigationOutcome::Changed
    }
}
