//! Client-side route table for the web UI.
//!
//! Maps URL paths to views (home, login, stream, user profile, error),
//! tracks the current location, and notifies the hosting shell on change.
//!
//! ```
//! use webui_router::routing::{default_routes, RouteTable};
//! use webui_router::View;
//!
//! let table = RouteTable::new(default_routes()).unwrap();
//! let res = table.resolve("/users/42/stream");
//! assert_eq!(res.view, View::Stream);
//! assert_eq!(res.params["user_id"], "42");
//! ```

pub mod config;
pub mod history;
pub mod http;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::RouterConfig;
pub use navigation::{NavigationProvider, Navigator};
pub use routing::{Resolution, RouteTable};
pub use view::View;
