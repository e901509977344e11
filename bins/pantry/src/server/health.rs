//! `GET /health`

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use pantry_telemetry::metrics;
use serde_json::{Value, json};
use std::sync::Arc;

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let report = state.health.run();
    let status = if report.status.is_operational() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": report.status,
            "version": env!("CARGO_PKG_VERSION"),
            "uptimeSecs": state.started.elapsed().as_secs(),
            "checks": report.checks,
            "timestamp": report.timestamp,
            "metrics": metrics().export_json(),
        })),
    )
}
