use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    database: String,
    version: String,
    uptime_seconds: u64,
}

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Start the uptime clock. Call once at process start; later calls keep the first instant.
pub fn mark_started() -> Instant {
    *START_TIME.get_or_init(Instant::now)
}

fn uptime_seconds() -> u64 {
    mark_started().elapsed().as_secs()
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime = uptime_seconds();

    let database = match state
        .db
        .run("health.ping", sqlx::query("SELECT 1").execute(state.db.pool()))
        .await
    {
        Ok(_) => "ok",
        Err(_) => "unavailable",
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
    })
}
