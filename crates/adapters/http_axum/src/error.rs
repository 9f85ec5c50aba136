//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use dmxmon_domain::error::MonitorError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`MonitorError`] to an HTTP response with appropriate status code.
pub struct ApiError(MonitorError);

impl From<MonitorError> for ApiError {
    fn from(err: MonitorError) -> Self {
        Self(err)
    }
}

/// Status code used for a [`MonitorError`] on any route.
pub(crate) fn status_for(err: &MonitorError) -> StatusCode {
    match err {
        MonitorError::InvalidUniverse(_) => StatusCode::BAD_REQUEST,
        MonitorError::Source(_) => StatusCode::BAD_GATEWAY,
        MonitorError::Stopped => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "monitor error");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
