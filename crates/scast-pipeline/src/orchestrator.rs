//! End-to-end run orchestration.
//!
//! Owns the stage sequencing, the per-run working directory and the
//! degradation policy. Every run ends in exactly one of: complete with full
//! features, complete with degraded features (listed on the report), or
//! failed with no artifact and no leftover intermediates.

use chrono::Utc;
use tokio::sync::watch;

use scast_media::{
    burn_subtitles, compose_slideshow, merge_audio, preprocess_image, write_frame, SubtitleStyle,
};
use scast_models::{
    Capability, RenderReport, RenderRequest, RunId, RunStage, SkippedCapability, SubtitleTrack,
    TimingPlan,
};
use scast_storage::{move_file, ArtifactKind};

use crate::context::PipelineContext;
use crate::error::{PipelineError, PipelineResult};
use crate::logging::RunLogger;
use crate::narration::{synthesize_narration, NarrationAsset};
use crate::run::{RunWorkspace, StageTracker};

/// One uploaded image, ordered by `index`.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub index: usize,
    pub bytes: Vec<u8>,
}

/// Execute a full pipeline run.
///
/// Blocking external-process invocations happen sequentially within the
/// run; concurrent runs share nothing but the read-only catalogs, the
/// storage areas and the bounded transcoder slots. The cancel token is
/// observed at every stage boundary and inside FFmpeg invocations.
pub async fn render_slideshow(
    ctx: &PipelineContext,
    request: &RenderRequest,
    images: Vec<ImageUpload>,
    cancel: watch::Receiver<bool>,
) -> PipelineResult<RenderReport> {
    let run_id = RunId::new();
    let logger = RunLogger::new(&run_id);
    let mut tracker = StageTracker::new();

    logger.log_stage(RunStage::Validating);
    ensure_live(&cancel)?;
    if images.is_empty() {
        return Err(PipelineError::NoValidImages);
    }

    let workspace = RunWorkspace::create(&ctx.config.work_dir, &run_id).await?;

    let result = execute(
        ctx, request, images, &cancel, &run_id, &workspace, &mut tracker, &logger,
    )
    .await;

    // Both terminal states drop every intermediate before reporting.
    workspace.cleanup().await;

    match result {
        Ok(report) => {
            logger.log_completion(&format!(
                "{} ({:.2}s, audio: {})",
                report.video_file, report.total_duration, report.has_audio
            ));
            Ok(report)
        }
        Err(e) => {
            let _ = tracker.advance(RunStage::Failed);
            logger.log_error(&e.to_string());
            Err(e)
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn execute(
    ctx: &PipelineContext,
    request: &RenderRequest,
    images: Vec<ImageUpload>,
    cancel: &watch::Receiver<bool>,
    run_id: &RunId,
    workspace: &RunWorkspace,
    tracker: &mut StageTracker,
    logger: &RunLogger,
) -> PipelineResult<RenderReport> {
    let mut skipped: Vec<SkippedCapability> = Vec::new();

    // Preprocess: decode failures skip the image, not the run.
    tracker.advance(RunStage::PreprocessingImages)?;
    logger.log_stage(RunStage::PreprocessingImages);
    ensure_live(cancel)?;
    let frames = preprocess_uploads(ctx, request, images, workspace, logger)?;

    // Narration: absent text means silent by request, not a degradation.
    tracker.advance(RunStage::SynthesizingNarration)?;
    logger.log_stage(RunStage::SynthesizingNarration);
    ensure_live(cancel)?;
    let narration: Option<NarrationAsset> = match request.narration_text() {
        None => None,
        Some(text) => {
            match synthesize_narration(ctx, workspace, text, request.voice, logger).await {
                Ok(asset) => Some(asset),
                Err(skip) => {
                    skipped.push(skip);
                    None
                }
            }
        }
    };

    // Timing: the single source of truth for every downstream stage.
    tracker.advance(RunStage::PlanningTiming)?;
    logger.log_stage(RunStage::PlanningTiming);
    ensure_live(cancel)?;
    let plan = TimingPlan::compute(
        frames.len(),
        request.duration_per_image,
        request.auto_duration,
        narration.as_ref().map(|n| n.duration),
    );
    logger.log_progress(&format!(
        "plan: {} images, {:.2}s each, {:.2}s total (auto: {})",
        plan.image_count(),
        plan.per_image_duration,
        plan.total_duration,
        plan.auto_duration_used
    ));

    let subtitles = match (&request.subtitles, &narration) {
        (Some(options), Some(asset)) => {
            let text = request.narration_text().unwrap_or_default();
            SubtitleTrack::generate(text, asset.duration, options.words_per_segment)
        }
        (Some(_), None) => {
            skipped.push(SkippedCapability::new(
                Capability::Subtitles,
                "narration unavailable",
            ));
            SubtitleTrack::default()
        }
        (None, _) => SubtitleTrack::default(),
    };

    // Composite: the only stage with no degraded mode.
    tracker.advance(RunStage::Compositing)?;
    logger.log_stage(RunStage::Compositing);
    ensure_live(cancel)?;
    let silent_path = workspace.path("silent.mp4");
    {
        let _slot = ctx.acquire_ffmpeg_slot().await;
        compose_slideshow(
            &frames,
            &plan,
            request.transition,
            &ctx.config.encoding,
            workspace.dir(),
            &silent_path,
            &ctx.runner(cancel),
        )
        .await
        .map_err(|e| match e {
            scast_media::MediaError::Cancelled => PipelineError::Cancelled,
            e => PipelineError::stage_failed(RunStage::Compositing, e.to_string()),
        })?;
    }

    // Mix: failure falls back to the silent video.
    tracker.advance(RunStage::MixingAudio)?;
    logger.log_stage(RunStage::MixingAudio);
    ensure_live(cancel)?;
    let mut current = silent_path.clone();
    let mut has_audio = false;
    let mut has_music = false;

    if narration.is_none() && request.music.is_some() {
        skipped.push(SkippedCapability::new(
            Capability::Music,
            "no narration to mix with",
        ));
    }

    if let Some(asset) = &narration {
        let music = match &request.music {
            None => None,
            Some(selection) => {
                let _slot = ctx.acquire_ffmpeg_slot().await;
                match ctx.music.ensure_track(&selection.track_id).await {
                    Ok(path) => Some((path, selection.volume)),
                    Err(e) => {
                        logger.log_degraded(&format!("music unavailable: {}", e));
                        skipped.push(SkippedCapability::new(
                            Capability::Music,
                            format!("music unavailable: {}", e),
                        ));
                        None
                    }
                }
            }
        };

        let muxed_path = workspace.path("muxed.mp4");
        let mix_result = {
            let _slot = ctx.acquire_ffmpeg_slot().await;
            merge_audio(
                &current,
                &asset.path,
                music.as_ref().map(|(p, v)| (p.as_path(), *v)),
                asset.duration,
                plan.total_duration,
                &ctx.config.encoding,
                &muxed_path,
                &ctx.runner(cancel),
            )
            .await
        };

        match mix_result {
            Ok(()) => {
                current = muxed_path;
                has_audio = true;
                has_music = music.is_some();
            }
            Err(scast_media::MediaError::Cancelled) => return Err(PipelineError::Cancelled),
            Err(e) => {
                // A silent video is a valid, better-than-nothing result.
                logger.log_degraded(&format!(
                    "audio merge failed, delivering silent video: {}",
                    e
                ));
                skipped.push(SkippedCapability::new(
                    Capability::Narration,
                    format!("audio merge failed: {}", e),
                ));
                if music.is_some() {
                    skipped.push(SkippedCapability::new(
                        Capability::Music,
                        "audio merge failed",
                    ));
                }
            }
        }
    }

    // Burn: optional, failure keeps the pre-burn video.
    tracker.advance(RunStage::BurningSubtitles)?;
    let mut subtitles_applied = false;
    if !subtitles.is_empty() {
        logger.log_stage(RunStage::BurningSubtitles);
        ensure_live(cancel)?;
        let srt_path = workspace.path("captions.srt");
        tokio::fs::write(&srt_path, subtitles.to_srt()).await?;

        let burned_path = workspace.path("burned.mp4");
        let burn_result = {
            let _slot = ctx.acquire_ffmpeg_slot().await;
            burn_subtitles(
                &current,
                &srt_path,
                &SubtitleStyle::default(),
                &ctx.config.encoding,
                &burned_path,
                &ctx.runner(cancel),
            )
            .await
        };

        match burn_result {
            Ok(()) => {
                current = burned_path;
                subtitles_applied = true;
            }
            Err(scast_media::MediaError::Cancelled) => return Err(PipelineError::Cancelled),
            Err(e) => {
                logger.log_degraded(&format!("subtitle burn failed: {}", e));
                skipped.push(SkippedCapability::new(
                    Capability::Subtitles,
                    format!("subtitle burn failed: {}", e),
                ));
            }
        }
    }

    // Finalize: exactly one artifact, referenced by a stable name.
    ensure_live(cancel)?;
    let video_file = ArtifactKind::Video.unique_name("mp4");
    let destination = ctx.layout.output_path(&video_file);
    move_file(&current, &destination).await?;
    let file_size_bytes = tokio::fs::metadata(&destination).await?.len();

    tracker.advance(RunStage::Complete)?;

    Ok(RenderReport {
        run_id: run_id.clone(),
        video_file,
        file_size_bytes,
        resolution: ctx.config.resolution(),
        image_count: frames.len(),
        per_image_duration: plan.per_image_duration,
        total_duration: plan.total_duration,
        auto_duration_used: plan.auto_duration_used,
        has_audio,
        has_music,
        subtitles_applied,
        voice_used: has_audio.then(|| request.voice),
        narration_duration: narration.as_ref().map(|n| n.duration),
        transition: request.transition,
        filter: request.filter,
        enhanced: request.enhance,
        skipped,
        created_at: Utc::now(),
    })
}

/// Decode, filter, enhance and resize the uploads into workspace frames.
///
/// Corrupt images are skipped with a warning; a run with no surviving image
/// fails with an input-validation error.
fn preprocess_uploads(
    ctx: &PipelineContext,
    request: &RenderRequest,
    mut images: Vec<ImageUpload>,
    workspace: &RunWorkspace,
    logger: &RunLogger,
) -> PipelineResult<Vec<std::path::PathBuf>> {
    images.sort_by_key(|upload| upload.index);

    let mut frames = Vec::new();
    for upload in &images {
        let processed = match preprocess_image(
            &upload.bytes,
            request.filter,
            request.enhance,
            ctx.config.target_width,
            ctx.config.target_height,
        ) {
            Ok(img) => img,
            Err(e) => {
                logger.log_degraded(&format!("image {} skipped: {}", upload.index, e));
                continue;
            }
        };

        let path = workspace.path(&format!("frame_{:03}.jpg", frames.len()));
        write_frame(&processed, &path)?;
        frames.push(path);
    }

    if frames.is_empty() {
        return Err(PipelineError::NoValidImages);
    }

    logger.log_progress(&format!(
        "{}/{} images preprocessed",
        frames.len(),
        images.len()
    ));
    Ok(frames)
}

fn ensure_live(cancel: &watch::Receiver<bool>) -> PipelineResult<()> {
    if *cancel.borrow() {
        Err(PipelineError::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scast_media::EspeakEngine;
    use scast_storage::StorageLayout;
    use std::sync::Arc;
    use tempfile::TempDir;

    use crate::config::PipelineConfig;

    async fn test_context(root: &std::path::Path) -> PipelineContext {
        let layout = StorageLayout::init(root.join("storage")).await.unwrap();
        let config = PipelineConfig {
            work_dir: root.join("work"),
            ..PipelineConfig::default()
        };
        PipelineContext::new(
            config,
            layout,
            Arc::new(EspeakEngine::with_binary("/nonexistent/espeak")),
        )
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_empty_request_is_input_error() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(dir.path()).await;
        let (_tx, rx) = watch::channel(false);

        let err = render_slideshow(&ctx, &RenderRequest::default(), Vec::new(), rx)
            .await
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(dir.path()).await;
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let images = vec![ImageUpload {
            index: 0,
            bytes: png_bytes(),
        }];
        let err = render_slideshow(&ctx, &RenderRequest::default(), images, rx)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled));
    }

    #[tokio::test]
    async fn test_preprocess_skips_corrupt_images() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(dir.path()).await;
        let run_id = RunId::new();
        let workspace = RunWorkspace::create(&ctx.config.work_dir, &run_id)
            .await
            .unwrap();
        let logger = RunLogger::new(&run_id);

        let uploads = vec![
            ImageUpload {
                index: 0,
                bytes: b"not an image".to_vec(),
            },
            ImageUpload {
                index: 1,
                bytes: png_bytes(),
            },
        ];

        let frames =
            preprocess_uploads(&ctx, &RenderRequest::default(), uploads, &workspace, &logger)
                .unwrap();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].exists());

        workspace.cleanup().await;
    }

    #[tokio::test]
    async fn test_preprocess_all_corrupt_is_input_error() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(dir.path()).await;
        let run_id = RunId::new();
        let workspace = RunWorkspace::create(&ctx.config.work_dir, &run_id)
            .await
            .unwrap();
        let logger = RunLogger::new(&run_id);

        let uploads = vec![ImageUpload {
            index: 0,
            bytes: b"garbage".to_vec(),
        }];

        let err = preprocess_uploads(&ctx, &RenderRequest::default(), uploads, &workspace, &logger)
            .unwrap_err();
        assert!(err.is_input_error());

        workspace.cleanup().await;
    }
}
