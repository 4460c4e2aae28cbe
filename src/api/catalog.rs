use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::AppState;

use super::ErrorBody;

#[derive(Debug, Deserialize)]
pub(crate) struct AddContentRequest {
    id: String,
    title: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddUserRequest {
    id: String,
    #[serde(default)]
    interests: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatedResponse {
    id: String,
}

pub(crate) async fn add_content(
    State(state): State<AppState>,
    Json(request): Json<AddContentRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), (StatusCode, Json<ErrorBody>)> {
    let added = {
        let mut engine = state.engine().write().await;
        engine.add_content(
            &request.id,
            &request.title,
            &request.category,
            &request.tags,
            &request.description,
        )
    };
    if !added {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorBody::new(format!(
                "content id already exists: {}",
                request.id
            ))),
        ));
    }
    state.telemetry().metrics().content_added.inc();
    info!(content_id = %request.id, category = %request.category, "content added");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: request.id })))
}

pub(crate) async fn add_user(
    State(state): State<AppState>,
    Json(request): Json<AddUserRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), (StatusCode, Json<ErrorBody>)> {
    let added = {
        let mut engine = state.engine().write().await;
        engine.add_user(&request.id, &request.interests)
    };
    if !added {
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorBody::new(format!(
                "user id already exists: {}",
                request.id
            ))),
        ));
    }
    state.telemetry().metrics().users_added.inc();
    info!(user_id = %request.id, "user added");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: request.id })))
}
