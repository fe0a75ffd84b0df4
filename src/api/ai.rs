use axum::{
    extract::State,
    Json,
};
use serde::Serialize;

use crate::api::books::find_book;
use crate::api::extract::{Path, Query};
use crate::api::state::AppState;
use crate::completion::{recommendation_prompt, summary_prompt, ReaderFeatures};
use crate::error::{AppError, BackendContext};

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
}

/// GET /ai/summary/:id
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SummaryResponse>, AppError> {
    let book = find_book(&state.db, id).await?;

    tracing::debug!("Requesting summary for book {}", id);

    let summary = state
        .gateway
        .complete(&summary_prompt(&book))
        .await
        .backend("Unable to generate the summary for the book")?;

    Ok(Json(SummaryResponse { summary }))
}

/// GET /ai/recommendation/:id
pub async fn recommendation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(features): Query<ReaderFeatures>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let book = find_book(&state.db, id).await?;

    tracing::debug!("Requesting recommendation for book {}", id);

    let recommendation = state
        .gateway
        .complete(&recommendation_prompt(&book, &features))
        .await
        .backend("Unable to generate the recommendation for the book")?;

    Ok(Json(RecommendationResponse { recommendation }))
}
