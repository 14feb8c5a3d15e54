use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use rotor_core::SlotId;

use crate::app::AppState;
use crate::http::{error_response, NoticeResponse};

#[derive(Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}

#[derive(Serialize)]
pub struct EnabledResponse {
    pub slot: u8,
    pub enabled: bool,
}

/// PUT /slots/{slot}/enabled — flip a slot's live toggle.
///
/// Only the panel is written here; the reconciler persists the change on
/// its next tick, the same path a checkbox edit takes.
pub async fn set_enabled_handler(
    State(state): State<Arc<AppState>>,
    Path(slot): Path<u8>,
    Json(req): Json<EnabledRequest>,
) -> Result<Json<EnabledResponse>, (StatusCode, Json<NoticeResponse>)> {
    state
        .panel
        .set_enabled(SlotId(slot), req.enabled)
        .map_err(error_response)?;

    Ok(Json(EnabledResponse {
        slot,
        enabled: req.enabled,
    }))
}
