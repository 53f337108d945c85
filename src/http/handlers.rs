//! Navigation API handlers.

use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::RequestIdExt;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::navigation::Menu;
use crate::observability::metrics;
use crate::routing::{location_from_href, normalize, ActivationResult, RouteId};

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub menus: usize,
}

#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    /// Current pathname or full href.
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActiveResponse {
    pub menu: String,
    /// Normalized location that was resolved.
    pub location: String,
    /// First active route, if any.
    pub active: Option<RouteId>,
    pub routes: ActivationResult,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        menus: state.inner.load().len(),
    })
}

pub async fn list_menus(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let registry = state.inner.load();
    let menus: Vec<_> = registry.menus().map(Menu::summary).collect();
    Ok(Json(serde_json::to_value(menus)?))
}

pub async fn active_route(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ActiveQuery>,
    headers: HeaderMap,
) -> Result<Json<ActiveResponse>, ApiError> {
    let start = Instant::now();
    let location = query.path.as_deref().map(location_from_href);

    let registry = state.inner.load();
    let routes = registry
        .resolve(&name, location.as_deref())
        .inspect_err(|e| {
            tracing::debug!(
                request_id = %headers.request_id(),
                menu = %name,
                location = ?location,
                error = %e,
                "Resolution rejected"
            );
        })?;

    let active = routes.first_active().cloned();
    metrics::record_resolution(&name, active.is_some(), start);
    tracing::debug!(
        request_id = %headers.request_id(),
        menu = %name,
        location = ?location,
        active = ?active,
        "Resolved active route"
    );

    Ok(Json(ActiveResponse {
        menu: name,
        location: normalize(location.as_deref()),
        active,
        routes,
    }))
}
