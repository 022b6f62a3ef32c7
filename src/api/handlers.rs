use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::Movie;
use crate::services::recommender::{Recommendation, DEFAULT_K};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendByTitleQuery {
    pub title: String,
    pub k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub original_language: String,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie.release_date,
            original_language: movie.original_language.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Lists catalog movies, sorted by title for the selection UI
pub async fn get_movies(State(state): State<AppState>) -> Json<Vec<MovieResponse>> {
    let mut movies: Vec<MovieResponse> = state
        .recommender
        .catalog()
        .movies()
        .iter()
        .map(MovieResponse::from)
        .collect();
    movies.sort_by(|a, b| a.title.cmp(&b.title));
    Json(movies)
}

/// Top-k recommendations for a catalog movie id
pub async fn recommend_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Json<RecommendationsResponse>> {
    let k = params.k.unwrap_or(DEFAULT_K);
    let recommendations = state.recommender.recommend_by_id(id, k)?;
    Ok(Json(RecommendationsResponse { recommendations }))
}

/// Top-k recommendations by exact title
pub async fn recommend_by_title(
    State(state): State<AppState>,
    Query(query): Query<RecommendByTitleQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let k = query.k.unwrap_or(DEFAULT_K);
    let recommendations = state.recommender.recommend_by_title(&query.title, k)?;
    Ok(Json(RecommendationsResponse { recommendations }))
}
