//! Shared utilities for integration tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use webui_router::config::HistoryConfig;
use webui_router::navigation::Subscription;
use webui_router::routing::{default_routes, RouteTable};
use webui_router::{Navigator, View};

/// The web UI's route table.
#[allow(dead_code)]
pub fn app_table() -> Arc<RouteTable<View>> {
    Arc::new(RouteTable::new(default_routes()).expect("default routes are valid"))
}

/// A navigator over the web UI's table in hash mode.
#[allow(dead_code)]
pub fn app_navigator() -> Navigator<View> {
    Navigator::new(app_table(), &HistoryConfig::default())
}

/// Records `(label, from, to)` for every change a listener sees.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<(String, View, View)>>>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn attach(&self, nav: &mut Navigator<View>, label: &str) -> Subscription {
        let events = Rc::clone(&self.events);
        let label = label.to_string();
        nav.on_change(move |change| {
            events
                .borrow_mut()
                .push((label.clone(), change.from.view, change.to.view));
        })
    }

    pub fn events(&self) -> Vec<(String, View, View)> {
        self.events.borrow().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.0.clone()).collect()
    }
}
