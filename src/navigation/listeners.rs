//! Change listeners and their subscription handles.

use std::cell::Cell;
use std::rc::Rc;

use crate::routing::Resolution;

/// A completed route change, delivered to listeners.
#[derive(Debug)]
pub struct RouteChange<'a, V> {
    pub from: &'a Resolution<V>,
    pub to: &'a Resolution<V>,
}

/// Boxed change callback.
pub type ChangeCallback<V> = Box<dyn FnMut(&RouteChange<'_, V>)>;

struct Listener<V> {
    id: u64,
    active: Rc<Cell<bool>>,
    callback: ChangeCallback<V>,
}

/// Handle returned by `on_change`.
///
/// Dropping the handle leaves the callback registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
#[must_use = "dropping a Subscription does not unsubscribe; keep it to call unsubscribe()"]
pub struct Subscription {
    id: u64,
    active: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Deregister the callback. It is not invoked again, even if a dispatch
    /// is in progress.
    pub fn unsubscribe(self) {
        self.active.set(false);
        tracing::trace!(subscription = self.id, "Listener unsubscribed");
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Registered callbacks, in registration order.
pub(crate) struct Listeners<V> {
    entries: Vec<Listener<V>>,
    next_id: u64,
}

impl<V> Listeners<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn subscribe(&mut self, callback: ChangeCallback<V>) -> Subscription {
        self.prune();
        let id = self.next_id;
        self.next_id += 1;
        let active = Rc::new(Cell::new(true));
        self.entries.push(Listener {
            id,
            active: Rc::clone(&active),
            callback,
        });
        tracing::trace!(subscription = id, "Listener subscribed");
        Subscription { id, active }
    }

    /// Invoke every active callback in registration order.
    pub(crate) fn dispatch(&mut self, change: &RouteChange<'_, V>) {
        self.prune();
        for listener in &mut self.entries {
            if listener.active.get() {
                (listener.callback)(change);
            }
        }
    }

    /// Number of callbacks not yet unsubscribed.
    pub(crate) fn len(&self) -> usize {
        self.entries.iter().filter(|l| l.active.get()).count()
    }

    fn prune(&mut self) {
        self.entries.retain(|l| {
            let keep = l.active.get();
            if !keep {
                tracing::trace!(subscription = l.id, "Listener removed");
            }
            keep
        });
    }
}
