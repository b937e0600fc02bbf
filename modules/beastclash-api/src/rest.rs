use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use beastclash_common::BeastclashError;

use crate::AppState;

#[derive(Deserialize)]
pub struct BattleRequest {
    animal1: String,
    animal2: String,
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// One battle per request; no partial result is ever returned.
pub async fn api_battle(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BattleRequest>,
) -> impl IntoResponse {
    match state
        .oracle
        .predict_battle_outcome(&body.animal1, &body.animal2)
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(BeastclashError::Validation(msg)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": msg})),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "battle request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": "simulation failed"})),
            )
                .into_response()
        }
    }
}

pub async fn api_matchup(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.oracle.get_random_matchup().await {
        Ok(matchup) => Json(matchup).into_response(),
        Err(e) => {
            warn!(error = %e, "matchup request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"error": "randomizer failed"})),
            )
                .into_response()
        }
    }
}
