use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::debug;

use crate::app::AppState;
use crate::engine::EngineStats;
use crate::engine::scoring::ScoredContent;
use crate::engine::signals::RecContext;

const DEFAULT_COUNT: usize = 10;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendQuery {
    count: Option<usize>,
    /// Hour-of-day override, 0-23. Without it the local clock applies.
    hour: Option<u32>,
    weekend: Option<bool>,
}

impl RecommendQuery {
    fn context(&self) -> Option<RecContext> {
        match (self.hour, self.weekend) {
            (None, None) => None,
            (hour, weekend) => {
                let current = RecContext::current();
                Some(RecContext {
                    hour: hour.map_or(current.hour, |h| h.min(23)),
                    is_weekend: weekend.unwrap_or(current.is_weekend),
                })
            }
        }
    }
}

pub(crate) async fn for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Json<Vec<ScoredContent>> {
    let count = query.count.unwrap_or(DEFAULT_COUNT);
    let context = query.context();

    let timer = state
        .telemetry()
        .metrics()
        .recommend_duration
        .start_timer();
    let batch = {
        let mut engine = state.engine().write().await;
        engine.recommendations(&user_id, count, context)
    };
    timer.observe_duration();

    state.telemetry().metrics().recommendations_served.inc();
    if batch.serendipity_injected {
        state.telemetry().metrics().serendipity_injections.inc();
    }
    debug!(
        user_id = %user_id,
        count,
        returned = batch.items.len(),
        "recommendations served"
    );
    Json(batch.items)
}

pub(crate) async fn stats(State(state): State<AppState>) -> Json<EngineStats> {
    let engine = state.engine().read().await;
    Json(engine.stats())
}
