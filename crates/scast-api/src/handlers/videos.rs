//! Video creation and image processing handlers.

use std::collections::HashMap;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tokio::sync::watch;
use validator::Validate;

use scast_media::{encode_jpeg, preprocess_image};
use scast_models::{
    FilterKind, MusicSelection, RenderReport, RenderRequest, SubtitleOptions, VoiceId,
    DEFAULT_WORDS_PER_SUBTITLE,
};
use scast_pipeline::{render_slideshow, ImageUpload};
use scast_storage::ArtifactKind;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Create a slideshow video from uploaded images and form options.
///
/// Runs the full pipeline within the request and returns the render report.
pub async fn create_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<RenderReport>> {
    let mut images: Vec<ImageUpload> = Vec::new();
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.to_string()))?;
            images.push(ImageUpload {
                index: images.len(),
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(e.to_string()))?;
            fields.insert(name, value);
        }
    }

    if images.is_empty() {
        return Err(ApiError::bad_request("No images uploaded"));
    }

    let request = build_render_request(&fields)?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // No cancellation surface yet; the token is observed at stage
    // boundaries once one exists.
    let (_cancel_tx, cancel_rx) = watch::channel(false);

    let report = render_slideshow(&state.pipeline, &request, images, cancel_rx).await?;
    Ok(Json(report))
}

/// Translate the multipart form fields into a render request.
fn build_render_request(fields: &HashMap<String, String>) -> ApiResult<RenderRequest> {
    let mut request = RenderRequest::default();

    if let Some(text) = fields.get("audio_text") {
        request.audio_text = Some(text.clone());
    }
    if let Some(voice) = fields.get("voice") {
        request.voice = VoiceId::resolve(voice);
    }
    if let Some(value) = fields.get("duration_per_image") {
        request.duration_per_image = value
            .parse()
            .map_err(|_| ApiError::bad_request("Invalid duration_per_image"))?;
    }
    if let Some(value) = fields.get("auto_duration") {
        request.auto_duration = parse_bool(value);
    }
    if let Some(value) = fields.get("transition") {
        request.transition = value
            .parse()
            .map_err(|_| ApiError::bad_request(format!("Unknown transition: {}", value)))?;
    }
    if let Some(value) = fields.get("filter") {
        request.filter = value
            .parse()
            .map_err(|_| ApiError::bad_request(format!("Unknown filter: {}", value)))?;
    }
    if let Some(value) = fields.get("enhance") {
        request.enhance = parse_bool(value);
    }

    if let Some(track_id) = fields
        .get("music_track")
        .filter(|t| !t.is_empty() && t.as_str() != "none")
    {
        let volume = fields
            .get("music_volume")
            .and_then(|v| v.parse().ok())
            .unwrap_or(scast_models::music::DEFAULT_MUSIC_VOLUME);
        request.music = Some(MusicSelection {
            track_id: track_id.clone(),
            volume,
        });
    }

    if fields.get("subtitles").map(|v| parse_bool(v)).unwrap_or(false) {
        let words_per_segment = fields
            .get("words_per_subtitle")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WORDS_PER_SUBTITLE);
        request.subtitles = Some(SubtitleOptions { words_per_segment });
    }

    Ok(request)
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Processed-image response.
#[derive(Serialize)]
pub struct ProcessedImageResponse {
    pub filename: String,
    pub filter_applied: FilterKind,
    pub enhanced: bool,
    pub url: String,
}

/// Apply a filter/enhancement to a single uploaded image.
pub async fn process_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ProcessedImageResponse>> {
    let mut bytes: Option<Vec<u8>> = None;
    let mut filter = FilterKind::None;
    let mut enhance = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        match field.name().unwrap_or_default() {
            "file" | "image" => {
                bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(e.to_string()))?
                        .to_vec(),
                );
            }
            "filter" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                filter = value
                    .parse()
                    .map_err(|_| ApiError::bad_request(format!("Unknown filter: {}", value)))?;
            }
            "enhance" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                enhance = parse_bool(&value);
            }
            _ => {}
        }
    }

    let bytes = bytes.ok_or_else(|| ApiError::bad_request("No image uploaded"))?;

    let config = &state.pipeline.config;
    let processed = preprocess_image(
        &bytes,
        filter,
        enhance,
        config.target_width,
        config.target_height,
    )?;

    let filename = ArtifactKind::Image.unique_name("jpg");
    let path = state.pipeline.layout.upload_path(&filename);
    tokio::fs::write(&path, encode_jpeg(&processed)?)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let url = format!("/api/download/{}", filename);
    Ok(Json(ProcessedImageResponse {
        filename,
        filter_applied: filter,
        enhanced: enhance,
        url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scast_models::TransitionKind;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_no_fields() {
        let request = build_render_request(&fields(&[])).unwrap();
        assert!(request.audio_text.is_none());
        assert!((request.duration_per_image - 3.0).abs() < f64::EPSILON);
        assert!(request.auto_duration);
    }

    #[test]
    fn test_full_field_set() {
        let request = build_render_request(&fields(&[
            ("audio_text", "hello there"),
            ("voice", "male_uk"),
            ("duration_per_image", "4.5"),
            ("auto_duration", "false"),
            ("transition", "dissolve"),
            ("filter", "sepia"),
            ("enhance", "true"),
            ("music_track", "calm_waves"),
            ("music_volume", "0.4"),
            ("subtitles", "true"),
            ("words_per_subtitle", "7"),
        ]))
        .unwrap();

        assert_eq!(request.voice, VoiceId::MaleUk);
        assert!((request.duration_per_image - 4.5).abs() < f64::EPSILON);
        assert!(!request.auto_duration);
        assert_eq!(request.transition, TransitionKind::Dissolve);
        assert_eq!(request.filter, FilterKind::Sepia);
        assert!(request.enhance);

        let music = request.music.unwrap();
        assert_eq!(music.track_id, "calm_waves");
        assert!((music.volume - 0.4).abs() < f64::EPSILON);

        assert_eq!(request.subtitles.unwrap().words_per_segment, 7);
    }

    #[test]
    fn test_unknown_filter_rejected() {
        let err = build_render_request(&fields(&[("filter", "polaroid")])).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_unknown_voice_falls_back() {
        let request = build_render_request(&fields(&[("voice", "en-US-AriaNeural")])).unwrap();
        assert_eq!(request.voice, VoiceId::FemaleUs);
    }

    #[test]
    fn test_music_track_none_ignored() {
        let request = build_render_request(&fields(&[("music_track", "none")])).unwrap();
        assert!(request.music.is_none());
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool("YES"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }
}
