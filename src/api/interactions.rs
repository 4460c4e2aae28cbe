use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::info;

use crate::app::AppState;
use crate::engine::interaction::InteractionKind;

use super::ErrorBody;

#[derive(Debug, Deserialize)]
pub(crate) struct RecordInteractionRequest {
    user_id: String,
    content_id: String,
    #[serde(default = "default_kind")]
    kind: String,
    rating: Option<i32>,
    session_id: Option<String>,
}

fn default_kind() -> String {
    "view".to_string()
}

pub(crate) async fn record(
    State(state): State<AppState>,
    Json(request): Json<RecordInteractionRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorBody>)> {
    let kind: InteractionKind = request.kind.parse().unwrap_or(InteractionKind::View);

    let recorded = {
        let mut engine = state.engine().write().await;
        engine.record_interaction(
            &request.user_id,
            &request.content_id,
            kind,
            request.rating,
            request.session_id.clone(),
        )
    };
    if !recorded {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("unknown user or content id")),
        ));
    }
    state.telemetry().metrics().interactions_recorded.inc();
    info!(
        user_id = %request.user_id,
        content_id = %request.content_id,
        kind = %request.kind,
        "interaction recorded"
    );
    Ok(StatusCode::NO_CONTENT)
}
