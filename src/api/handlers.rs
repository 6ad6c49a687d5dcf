use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{
        Catalog, RatingConfirmation, RatingSubmission, RecommendationRequest,
        RecommendationResponse,
    },
    services::{ratings, recommendations},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the book catalog in rating-vector order
pub async fn get_books(State(state): State<AppState>) -> AppResult<Json<Catalog>> {
    let catalog = state.store.fetch_catalog().await?;
    Ok(Json(catalog))
}

/// Recommend unread books for the submitted ratings
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        rated = request.ratings.rated_count(),
        limit = ?request.limit,
        "Processing recommendation request"
    );

    let recommendations =
        recommendations::get_recommendations(state.store.clone(), state.engine.as_ref(), request)
            .await?;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendation completed"
    );

    Ok(Json(RecommendationResponse { recommendations }))
}

/// Store a reader's ratings
pub async fn submit_rating(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(submission): Json<RatingSubmission>,
) -> AppResult<(StatusCode, Json<RatingConfirmation>)> {
    tracing::info!(request_id = %request_id, "Processing rating submission");

    let record =
        ratings::record_rating(state.store.clone(), submission, state.engine.max_rating()).await?;

    Ok((StatusCode::CREATED, Json(RatingConfirmation::from(record))))
}
