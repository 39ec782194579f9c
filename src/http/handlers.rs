use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::routing::{Params, Resolution, ReverseError};
use crate::view::View;

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub routes: usize,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteSummary {
    pub index: usize,
    pub pattern: String,
    pub view: View,
    pub name: Option<String>,
    pub params: Vec<String>,
    pub catch_all: bool,
}

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    #[serde(flatten)]
    pub resolution: Resolution<View>,
    pub href: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HrefResponse {
    pub path: String,
    pub href: String,
}

/// JSON error body with a matching status code.
#[derive(Debug)]
pub struct ApiError(ReverseError);

impl From<ReverseError> for ApiError {
    fn from(err: ReverseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ReverseError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            ReverseError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
        routes: state.table.len(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    Json(route_summaries(&state))
}

pub async fn get_resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Json<ResolveResponse> {
    let resolution = state.table.resolve(&query.path);
    let href = state.base.href(&resolution.full_path());
    Json(ResolveResponse { resolution, href })
}

pub async fn get_href(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<HrefResponse>, ApiError> {
    let path = state.table.href(&name, &params)?;
    let href = state.base.href(&path);
    Ok(Json(HrefResponse { path, href }))
}

pub fn route_summaries(state: &AppState) -> Vec<RouteSummary> {
    state
        .table
        .routes()
        .enumerate()
        .map(|(index, route)| RouteSummary {
            index,
            pattern: route.pattern().to_string(),
            view: *route.view(),
            name: route.name().map(str::to_string),
            params: route.pattern().param_names().map(str::to_string).collect(),
            catch_all: route.pattern().has_wildcard(),
        })
        .collect()
}
