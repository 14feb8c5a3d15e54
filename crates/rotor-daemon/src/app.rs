use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use rotor_core::RotorConfig;
use rotor_scheduler::{Panel, ScheduleController};

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: RotorConfig,
    pub controller: ScheduleController,
    pub panel: Panel,
}

impl AppState {
    pub fn new(config: RotorConfig, controller: ScheduleController, panel: Panel) -> Self {
        Self {
            config,
            controller,
            panel,
        }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/status", get(crate::http::status::status_handler))
        .route(
            "/schedule/interval",
            put(crate::http::schedule::set_interval_handler),
        )
        .route("/schedule/pause", post(crate::http::schedule::pause_handler))
        .route(
            "/schedule/resume",
            post(crate::http::schedule::resume_handler),
        )
        .route(
            "/slots/{slot}/enabled",
            put(crate::http::slots::set_enabled_handler),
        )
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
