//! API integration tests.
//!
//! These exercise the router end to end without touching FFmpeg: catalogs,
//! health, and download-name validation.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use scast_api::{create_router, ApiConfig, AppState};

async fn test_app() -> Router {
    let storage_root = tempfile::tempdir().unwrap().into_path();
    let config = ApiConfig {
        storage_root,
        ..ApiConfig::default()
    };
    let state = AppState::new(config).await.unwrap();
    create_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get(test_app().await, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_root_lists_catalogs() {
    let (status, body) = get(test_app().await, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"]["voices"].as_array().unwrap().len(), 10);
    assert_eq!(body["features"]["filters"].as_array().unwrap().len(), 12);
    assert!(body["features"]["transitions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t == "fade"));
}

#[tokio::test]
async fn test_voice_catalog() {
    let (status, body) = get(test_app().await, "/api/voices").await;
    assert_eq!(status, StatusCode::OK);
    let voices = body["voices"].as_array().unwrap();
    assert_eq!(voices.len(), 10);
    assert!(voices.iter().any(|v| v["id"] == "narrator"));
}

#[tokio::test]
async fn test_music_catalog() {
    let (status, body) = get(test_app().await, "/api/music/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 6);

    let (status, body) = get(test_app().await, "/api/music/tracks?category=calm").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["tracks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_music_category_rejected() {
    let (status, _) = get(test_app().await, "/api/music/tracks?category=polka").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_missing_artifact() {
    let (status, _) = get(test_app().await, "/api/download/video_ghost.mp4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_video_requires_images() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/create-video")
                .header("content-type", "multipart/form-data; boundary=xxx")
                .body(Body::from("--xxx--\r\n"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
