//! JSON REST handlers.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Deserialize;

use dmxmon_app::monitor::MonitorStatus;
use dmxmon_domain::universe::UniverseId;

use crate::error::ApiError;
use crate::grid::CellView;
use crate::state::AppState;

/// Request body for changing the monitor state.
#[derive(Debug, Deserialize)]
pub struct SetStateRequest {
    pub enabled: bool,
    pub universe: UniverseId,
}

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cells", get(cells))
        .route("/monitor", get(monitor_status).post(set_monitor_state))
}

/// `GET /api/cells` — every cell in channel order (empty before first enable).
pub async fn cells(State(state): State<AppState>) -> Json<Vec<CellView>> {
    Json(state.grid.snapshot())
}

/// `GET /api/monitor`
///
/// # Errors
///
/// Fails with `503` when the monitor task has stopped.
pub async fn monitor_status(State(state): State<AppState>) -> Result<Json<MonitorStatus>, ApiError> {
    Ok(Json(state.monitor.status().await?))
}

/// `POST /api/monitor` — enable or disable the monitor for a universe.
///
/// # Errors
///
/// Fails with `503` when the monitor task has stopped.
pub async fn set_monitor_state(
    State(state): State<AppState>,
    Json(request): Json<SetStateRequest>,
) -> Result<Json<MonitorStatus>, ApiError> {
    state.monitor.set_state(request.enabled, request.universe)?;
    Ok(Json(state.monitor.status().await?))
}
