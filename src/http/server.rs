//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener, shut down gracefully
//!
//! # Design Decisions
//! - Read-only: handlers share the immutable route table through `Arc`
//! - JSON responses only

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{HistoryConfig, ServerConfig};
use crate::history::HistoryBase;
use crate::http::handlers::{get_health, get_href, get_resolve, get_routes};
use crate::lifecycle::shutdown;
use crate::routing::RouteTable;
use crate::view::View;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<RouteTable<View>>,
    pub base: HistoryBase,
}

/// HTTP server exposing the route table.
pub struct InspectServer {
    router: Router,
    config: ServerConfig,
}

impl InspectServer {
    pub fn new(table: Arc<RouteTable<View>>, history: &HistoryConfig, config: ServerConfig) -> Self {
        let state = AppState {
            table,
            base: HistoryBase::from_config(history),
        };
        let router = build_router(state, Duration::from_secs(config.request_timeout_secs));
        Self { router, config }
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve until the shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Inspection server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("Inspection server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/routes", get(get_routes))
        .route("/resolve", get(get_resolve))
        .route("/href/{name}", get(get_href))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
