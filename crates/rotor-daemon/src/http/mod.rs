pub mod health;
pub mod schedule;
pub mod slots;
pub mod status;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use rotor_scheduler::ScheduleError;

/// Transient notice body for rejected requests.
#[derive(Serialize)]
pub struct NoticeResponse {
    pub notice: String,
}

/// Map a scheduling error onto an HTTP response.
///
/// Validation failures carry their user-facing notice; anything else is a
/// plain 500 (store/queue failures are not user-recoverable).
pub fn error_response(err: ScheduleError) -> (StatusCode, Json<NoticeResponse>) {
    let (status, notice) = match err {
        ScheduleError::InvalidInterval { notice } => (StatusCode::UNPROCESSABLE_ENTITY, notice),
        ScheduleError::UnknownSlot { slot } => {
            (StatusCode::NOT_FOUND, format!("Unknown slot: SIM{slot}"))
        }
        other => {
            tracing::error!("request failed: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
        }
    };
    (status, Json(NoticeResponse { notice }))
}
