use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::app::AppState;
use crate::store::SnapshotError;

use super::ErrorBody;

#[derive(Debug, Serialize)]
pub(crate) struct SnapshotResponse {
    status: &'static str,
}

pub(crate) async fn save(
    State(state): State<AppState>,
) -> Result<Json<SnapshotResponse>, (StatusCode, Json<ErrorBody>)> {
    let snapshot = {
        let engine = state.engine().read().await;
        engine.snapshot()
    };
    if let Err(err) = state.snapshot_store().save(&snapshot).await {
        error!(error = %err, "snapshot save failed");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(err.to_string())),
        ));
    }
    Ok(Json(SnapshotResponse { status: "saved" }))
}

pub(crate) async fn load(
    State(state): State<AppState>,
) -> Result<Json<SnapshotResponse>, (StatusCode, Json<ErrorBody>)> {
    let snapshot = match state.snapshot_store().load().await {
        Ok(snapshot) => snapshot,
        Err(err @ SnapshotError::NotFound(_)) => {
            return Err((StatusCode::NOT_FOUND, Json(ErrorBody::new(err.to_string()))));
        }
        Err(err) => {
            error!(error = %err, "snapshot load failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(err.to_string())),
            ));
        }
    };

    let mut engine = state.engine().write().await;
    engine.restore(snapshot);
    Ok(Json(SnapshotResponse { status: "loaded" }))
}
