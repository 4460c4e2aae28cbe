use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) struct HealthReport {
    status: &'static str,
}

pub(crate) async fn ready() -> Json<HealthReport> {
    // No upstream dependencies: ready as soon as the router is up.
    Json(HealthReport { status: "ready" })
}

pub(crate) async fn live() -> Json<HealthReport> {
    Json(HealthReport { status: "live" })
}
