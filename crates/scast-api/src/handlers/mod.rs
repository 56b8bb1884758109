//! Request handlers.

pub mod downloads;
pub mod music;
pub mod speech;
pub mod stock;
pub mod videos;

use axum::Json;
use chrono::Utc;
use serde::Serialize;

use scast_media::{check_ffmpeg, EspeakEngine};
use scast_models::{FilterKind, MusicCategory, TransitionKind, VoiceId};

/// Service banner.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: String,
    pub features: ServiceFeatures,
}

#[derive(Serialize)]
pub struct ServiceFeatures {
    pub voices: Vec<&'static str>,
    pub filters: Vec<&'static str>,
    pub transitions: Vec<&'static str>,
    pub music_categories: Vec<&'static str>,
}

/// Service banner endpoint.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Slidecast video studio".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        features: ServiceFeatures {
            voices: VoiceId::ALL.iter().map(|v| v.as_str()).collect(),
            filters: FilterKind::ALL.iter().map(|f| f.as_str()).collect(),
            transitions: TransitionKind::ALL.iter().map(|t| t.as_str()).collect(),
            music_categories: MusicCategory::ALL.iter().map(|c| c.as_str()).collect(),
        },
    })
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub ffmpeg_available: bool,
    pub speech_engine_available: bool,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
        ffmpeg_available: check_ffmpeg().is_ok(),
        speech_engine_available: EspeakEngine::discover().is_ok(),
    })
}
