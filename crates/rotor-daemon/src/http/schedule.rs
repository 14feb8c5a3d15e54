use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::AppState;
use crate::http::{error_response, NoticeResponse};

#[derive(Deserialize)]
pub struct IntervalRequest {
    /// Raw text from the interval field; validated server-side.
    pub seconds: String,
}

#[derive(Serialize)]
pub struct IntervalResponse {
    pub interval_secs: i64,
    /// Status summary, e.g. "Switching eSIM every 45 seconds."
    pub message: String,
}

/// PUT /schedule/interval — validate and apply a new switch interval.
pub async fn set_interval_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IntervalRequest>,
) -> Result<Json<IntervalResponse>, (StatusCode, Json<NoticeResponse>)> {
    let now_ms = Utc::now().timestamp_millis();
    let secs = state
        .controller
        .set_interval(&req.seconds, now_ms)
        .map_err(error_response)?;

    Ok(Json(IntervalResponse {
        interval_secs: secs,
        message: format!("Switching eSIM every {secs} seconds."),
    }))
}

#[derive(Serialize)]
pub struct PlayStateResponse {
    pub playing: bool,
}

/// POST /schedule/pause — stop switching, keep the schedule state.
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlayStateResponse>, (StatusCode, Json<NoticeResponse>)> {
    state.controller.pause().map_err(error_response)?;
    Ok(Json(PlayStateResponse { playing: false }))
}

/// POST /schedule/resume — restart switching with a fresh full window.
pub async fn resume_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlayStateResponse>, (StatusCode, Json<NoticeResponse>)> {
    let now_ms = Utc::now().timestamp_millis();
    state.controller.resume(now_ms).map_err(error_response)?;
    Ok(Json(PlayStateResponse { playing: true }))
}
