//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::downloads::download_file;
use crate::handlers::music::{download_track, music_categories, music_tracks};
use crate::handlers::speech::{advanced_tts, list_voices};
use crate::handlers::stock::search_stock_photos;
use crate::handlers::videos::{create_video, process_image};
use crate::handlers::{health, root};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Core pipeline
        .route("/create-video", post(create_video))
        .route("/process-image", post(process_image))
        // Speech
        .route("/advanced-tts", post(advanced_tts))
        .route("/voices", get(list_voices))
        // Music catalog
        .route("/music/categories", get(music_categories))
        .route("/music/tracks", get(music_tracks))
        .route("/music/download/:track_id", get(download_track))
        // Stock photos
        .route("/stock-photos/search", get(search_stock_photos))
        // Artifact downloads
        .route("/download/:filename", get(download_file));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
