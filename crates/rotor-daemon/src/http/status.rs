use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use rotor_scheduler::SlotStatus;

use crate::app::AppState;
use crate::http::NoticeResponse;

#[derive(Serialize)]
pub struct StatusResponse {
    pub playing: bool,
    pub interval_secs: i64,
    /// Rendered countdown line, e.g. "Next switch in 60 seconds".
    pub countdown: String,
    pub slots: Vec<SlotStatus>,
}

/// GET /status — current schedule and per-slot display state.
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<NoticeResponse>)> {
    let now_ms = Utc::now().timestamp_millis();
    let schedule = state
        .controller
        .snapshot(now_ms)
        .map_err(crate::http::error_response)?;
    let panel = state.panel.snapshot();

    Ok(Json(StatusResponse {
        playing: schedule.playing,
        interval_secs: schedule.interval_secs,
        countdown: panel.countdown.text(),
        slots: panel.slots,
    }))
}
