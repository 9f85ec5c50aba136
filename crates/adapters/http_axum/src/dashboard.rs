//! Server-side rendered channel grid (no JavaScript).

use std::str::FromStr;

use askama::Template;
use axum::Form;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use serde::Deserialize;

use dmxmon_domain::error::MonitorError;
use dmxmon_domain::universe::UniverseId;

use crate::error::status_for;
use crate::grid::CellView;
use crate::state::AppState;

/// Error rendered as a plain-text page.
pub struct DashboardError(MonitorError);

impl From<MonitorError> for DashboardError {
    fn from(err: MonitorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        (status_for(&self.0), self.0.to_string()).into_response()
    }
}

/// One cell as drawn on the page.
pub struct GridCell {
    number: usize,
    title: String,
    text: String,
    style: String,
}

impl From<CellView> for GridCell {
    fn from(view: CellView) -> Self {
        let background = view
            .background
            .map(|color| format!("background: {color};"))
            .unwrap_or_default();
        let foreground = view
            .foreground
            .map(|color| format!("color: {color};"))
            .unwrap_or_default();
        Self {
            number: view.channel,
            title: view.title,
            text: view.text,
            style: format!("{background}{foreground}"),
        }
    }
}

/// Monitor page template.
#[derive(Template)]
#[template(path = "monitor.html")]
pub struct MonitorTemplate {
    refresh_seconds: u32,
    enabled: bool,
    universe: String,
    cells: Vec<GridCell>,
}

impl IntoResponse for MonitorTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render monitor page");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Form posted by the enable/disable control.
#[derive(Debug, Deserialize)]
pub struct MonitorForm {
    /// Present (`"on"`) when the checkbox is ticked.
    pub enabled: Option<String>,
    pub universe: String,
}

/// Build the dashboard sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/monitor", post(update_monitor))
}

/// `GET /` — the channel grid.
///
/// # Errors
///
/// Fails with `503` when the monitor task has stopped.
pub async fn index(State(state): State<AppState>) -> Result<MonitorTemplate, DashboardError> {
    let status = state.monitor.status().await?;
    let cells = state
        .grid
        .snapshot()
        .into_iter()
        .map(GridCell::from)
        .collect();

    Ok(MonitorTemplate {
        refresh_seconds: state.refresh_seconds,
        enabled: status.enabled,
        universe: status
            .universe
            .map(|universe| universe.to_string())
            .unwrap_or_default(),
        cells,
    })
}

/// `POST /monitor` — apply the form and redirect back to the grid.
///
/// # Errors
///
/// Fails with `400` for an unparseable universe, `503` when the monitor
/// task has stopped.
pub async fn update_monitor(
    State(state): State<AppState>,
    Form(form): Form<MonitorForm>,
) -> Result<Redirect, DashboardError> {
    let universe = UniverseId::from_str(&form.universe)?;
    state.monitor.set_state(form.enabled.is_some(), universe)?;
    Ok(Redirect::to("/"))
}
