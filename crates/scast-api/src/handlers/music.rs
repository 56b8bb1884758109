//! Music catalog handlers.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use scast_models::music::{tracks_in_category, MusicCategory, MusicTrack};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub description: &'static str,
    pub track_count: usize,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

/// List music categories.
pub async fn music_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: MusicCategory::ALL
            .iter()
            .map(|c| CategoryInfo {
                id: c.as_str(),
                description: c.description(),
                track_count: tracks_in_category(*c).count(),
            })
            .collect(),
    })
}

#[derive(Deserialize)]
pub struct TracksQuery {
    pub category: String,
}

#[derive(Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<MusicTrack>,
}

/// List tracks in a category.
pub async fn music_tracks(Query(query): Query<TracksQuery>) -> ApiResult<Json<TracksResponse>> {
    let category: MusicCategory = query
        .category
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Unknown music category: {}", query.category)))?;

    Ok(Json(TracksResponse {
        tracks: tracks_in_category(category).cloned().collect(),
    }))
}

/// Serve a track's audio bytes, generating the placeholder if needed.
pub async fn download_track(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
) -> ApiResult<Response> {
    let path = state.pipeline.music.ensure_track(&track_id).await?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "audio/mpeg")],
        bytes,
    )
        .into_response())
}
