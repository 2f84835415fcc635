//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{body::Bytes, extract::State, response::Json};
use tracing::{error, warn};

use crate::{
    state::{hours_to_seconds, TimerStore},
    utils::format_elapsed,
};
use super::responses::{
    ApiError, HealthResponse, StartRequest, StatusResponse, TimerResponse,
};

/// Handle GET /api/timer - Report whether the timer runs and how long it has run
pub async fn timer_handler(
    State(store): State<Arc<TimerStore>>,
) -> Result<Json<TimerResponse>, ApiError> {
    let (is_running, elapsed) = store.elapsed().map_err(|e| {
        error!("Failed to read timer state: {}", e);
        e
    })?;

    Ok(Json(TimerResponse {
        is_running,
        elapsed_seconds: elapsed,
        elapsed_formatted: format_elapsed(elapsed),
    }))
}

/// Handle POST /api/start - Start the timer, optionally with an offset in hours
pub async fn start_handler(
    State(store): State<Arc<TimerStore>>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    let request = parse_start_request(&body).map_err(|e| {
        warn!("Rejected start request: {}", e);
        e
    })?;

    let outcome = store.start(request.offset_hours)?;
    Ok(Json(StatusResponse::new(outcome.status())))
}

/// Handle POST /api/stop - Stop the timer
pub async fn stop_handler(
    State(store): State<Arc<TimerStore>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let outcome = store.stop()?;
    Ok(Json(StatusResponse::new(outcome.status())))
}

/// Handle POST /api/reset - Zero the timer
pub async fn reset_handler(
    State(store): State<Arc<TimerStore>>,
) -> Result<Json<StatusResponse>, ApiError> {
    store.reset()?;
    Ok(Json(StatusResponse::new("reset")))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// An empty body or a JSON `null` means "no offset"
fn parse_start_request(body: &[u8]) -> Result<StartRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StartRequest::default());
    }

    let request: Option<StartRequest> = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidInput(format!("invalid json: {}", e)))?;
    let request = request.unwrap_or_default();

    match request.offset_hours {
        Some(hours) if !hours.is_finite() || hours < 0.0 => Err(ApiError::InvalidInput(
            format!("offset_hours must be a non-negative number, got {}", hours),
        )),
        Some(hours) if hours_to_seconds(hours).is_none() => Err(ApiError::InvalidInput(
            format!("offset_hours {} is too large", hours),
        )),
        _ => Ok(request),
    }
}
