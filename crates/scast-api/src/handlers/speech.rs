//! Standalone speech synthesis and the voice catalog.

use axum::extract::{Form, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use scast_media::{estimate_duration, probe_duration};
use scast_models::{VoiceId, VoiceInfo};
use scast_storage::ArtifactKind;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Standalone TTS request.
#[derive(Debug, Deserialize)]
pub struct TtsForm {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub pitch: Option<String>,
}

/// Standalone TTS response.
#[derive(Serialize)]
pub struct TtsResponse {
    pub filename: String,
    pub voice: VoiceId,
    pub duration_secs: f64,
    pub text_length: usize,
    pub url: String,
}

/// Synthesize narration text to an audio artifact.
pub async fn advanced_tts(
    State(state): State<AppState>,
    Form(form): Form<TtsForm>,
) -> ApiResult<Json<TtsResponse>> {
    let text = form.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("Text is required"));
    }

    let voice = form
        .voice
        .as_deref()
        .map(VoiceId::resolve)
        .unwrap_or_default();
    let params = voice
        .params()
        .with_hints(form.rate.as_deref(), form.pitch.as_deref());

    let filename = ArtifactKind::Audio.unique_name("wav");
    let path = state.pipeline.layout.output_path(&filename);

    state
        .pipeline
        .speech
        .synthesize(text, &params, &path)
        .await
        .map_err(|e| ApiError::unavailable(format!("Speech synthesis failed: {}", e)))?;

    let duration_secs = match probe_duration(&path).await {
        Ok(d) => d,
        Err(_) => estimate_duration(text),
    };

    let url = format!("/api/download/{}", filename);
    Ok(Json(TtsResponse {
        filename,
        voice,
        duration_secs,
        text_length: text.len(),
        url,
    }))
}

/// Voice catalog response.
#[derive(Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

/// List all available voices.
pub async fn list_voices() -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: VoiceId::ALL.iter().map(|v| v.info()).collect(),
    })
}
