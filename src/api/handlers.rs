use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::Artwork;
use crate::services::ScoredTitle;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    /// Number of results; defaults to the configured page size
    pub n: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ArtworkQuery {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub selected_title: Option<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// All catalog titles, alphabetically
pub async fn list_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.recommender.sorted_titles())
}

/// Ranked recommendations with hybrid scores
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> Json<Vec<ScoredTitle>> {
    let n = params
        .n
        .unwrap_or(state.recommendation_count as i64)
        .max(0) as usize;
    let results = state.recommender.recommend_scored(&params.title, n);

    tracing::info!(
        title = %params.title,
        requested = n,
        returned = results.len(),
        "Recommendations computed"
    );

    Json(results)
}

/// Poster and backdrop URLs for a title
pub async fn get_artwork(
    State(state): State<AppState>,
    Query(params): Query<ArtworkQuery>,
) -> Json<Artwork> {
    Json(state.artwork.lookup(&params.title).await)
}

/// Currently selected title
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        selected_title: state.selected_title().await,
    })
}

/// Change the selected title
pub async fn update_session(
    State(state): State<AppState>,
    Json(request): Json<UpdateSessionRequest>,
) -> AppResult<Json<SessionResponse>> {
    if !state.select_title(&request.title).await {
        return Err(AppError::NotFound(format!(
            "Title not in catalog: {}",
            request.title
        )));
    }

    Ok(Json(SessionResponse {
        selected_title: Some(request.title),
    }))
}
