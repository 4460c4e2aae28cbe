pub(crate) mod catalog;
pub(crate) mod health;
pub(crate) mod interactions;
pub(crate) mod metrics;
pub(crate) mod recommend;
pub(crate) mod snapshot;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::app::AppState;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health/ready", get(health::ready))
        .route("/health/live", get(health::live))
        .route("/metrics", get(metrics::exporter))
        .route("/v1/content", post(catalog::add_content))
        .route("/v1/users", post(catalog::add_user))
        .route("/v1/interactions", post(interactions::record))
        .route(
            "/v1/recommendations/{user_id}",
            get(recommend::for_user),
        )
        .route("/v1/stats", get(recommend::stats))
        .route("/v1/snapshot/save", post(snapshot::save))
        .route("/v1/snapshot/load", post(snapshot::load))
        .with_state(state)
}

/// Uniform error body for non-2xx responses.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

impl ErrorBody {
    pub(crate) fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
