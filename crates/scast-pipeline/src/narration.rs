//! Narration synthesis adapter.
//!
//! Wraps the speech-engine capability with the pipeline's degradation
//! policy: any engine failure, an empty output file or an unusable duration
//! makes narration unavailable instead of failing the run.

use std::path::PathBuf;

use scast_media::{estimate_duration, probe_duration};
use scast_models::{Capability, SkippedCapability, VoiceId};

use crate::context::PipelineContext;
use crate::logging::RunLogger;
use crate::run::RunWorkspace;

/// A synthesized narration track, owned by the run that produced it.
#[derive(Debug, Clone)]
pub struct NarrationAsset {
    pub path: PathBuf,
    /// Measured (or, on probe failure, estimated) duration in seconds
    pub duration: f64,
    pub voice: VoiceId,
    /// Whether the duration is a word-count estimate rather than a probe
    pub estimated: bool,
}

/// Synthesize narration for a run.
///
/// Returns the asset, or the skipped-capability record explaining why the
/// run proceeds silent.
pub(crate) async fn synthesize_narration(
    ctx: &PipelineContext,
    workspace: &RunWorkspace,
    text: &str,
    voice: VoiceId,
    logger: &RunLogger,
) -> Result<NarrationAsset, SkippedCapability> {
    let output = workspace.path("narration.wav");
    let params = voice.params();

    if let Err(e) = ctx.speech.synthesize(text, &params, &output).await {
        logger.log_degraded(&format!("speech engine failed: {}", e));
        return Err(SkippedCapability::new(
            Capability::Narration,
            format!("speech engine failed: {}", e),
        ));
    }

    let size = tokio::fs::metadata(&output).await.map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        logger.log_degraded("speech engine produced an empty file");
        return Err(SkippedCapability::new(
            Capability::Narration,
            "speech engine produced an empty file",
        ));
    }

    let (duration, estimated) = match probe_duration(&output).await {
        Ok(d) => (d, false),
        Err(e) => {
            logger.log_degraded(&format!(
                "audio probe failed, estimating duration from word count: {}",
                e
            ));
            (estimate_duration(text), true)
        }
    };

    if duration <= 0.0 {
        logger.log_degraded("narration has no usable duration");
        return Err(SkippedCapability::new(
            Capability::Narration,
            "narration has no usable duration",
        ));
    }

    logger.log_progress(&format!(
        "narration ready: {:.2}s with voice {}",
        duration, voice
    ));

    Ok(NarrationAsset {
        path: output,
        duration,
        voice,
        estimated,
    })
}
