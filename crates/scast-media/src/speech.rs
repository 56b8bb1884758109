//! Speech synthesis capability.
//!
//! The engine is injected as a trait object so the pipeline never touches a
//! concrete synthesizer; the process-backed implementation shells out to
//! espeak-ng.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use scast_models::voice::ESTIMATED_WORDS_PER_SECOND;
use scast_models::VoiceParams;

use crate::error::{MediaError, MediaResult};

/// Text-to-speech capability consumed by the pipeline.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Synthesize `text` into an audio file at `output`.
    async fn synthesize(&self, text: &str, voice: &VoiceParams, output: &Path) -> MediaResult<()>;

    /// Engine name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Process-backed speech engine using espeak-ng (or classic espeak).
#[derive(Debug, Clone)]
pub struct EspeakEngine {
    binary: PathBuf,
}

impl EspeakEngine {
    /// Locate the engine binary on PATH.
    pub fn discover() -> MediaResult<Self> {
        let binary = which::which("espeak-ng")
            .or_else(|_| which::which("espeak"))
            .map_err(|_| MediaError::SpeechEngineNotFound)?;
        Ok(Self { binary })
    }

    /// Use an explicit binary path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the argument list for one synthesis call.
    fn build_args(voice: &VoiceParams, output: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            format!("{}{}", voice.language, voice.variant),
            "-s".to_string(),
            voice.words_per_minute.to_string(),
            "-p".to_string(),
            voice.pitch.to_string(),
            "-w".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

#[async_trait]
impl SpeechEngine for EspeakEngine {
    async fn synthesize(&self, text: &str, voice: &VoiceParams, output: &Path) -> MediaResult<()> {
        let args = Self::build_args(voice, output);
        debug!(
            "Running speech engine: {} {} <text>",
            self.binary.display(),
            args.join(" ")
        );

        let result = Command::new(&self.binary)
            .args(&args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !result.status.success() {
            return Err(MediaError::speech_failed(
                "Speech engine exited with non-zero status",
                Some(String::from_utf8_lossy(&result.stderr).to_string()),
            ));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "espeak"
    }
}

/// Estimate narration duration from word count at a fixed speaking rate.
///
/// Best-effort fallback when probing the produced file fails; used for
/// timing only, never for playback guarantees.
pub fn estimate_duration(text: &str) -> f64 {
    text.split_whitespace().count() as f64 / ESTIMATED_WORDS_PER_SECOND
}

#[cfg(test)]
mod tests {
    use super::*;
    use scast_models::VoiceId;

    #[test]
    fn test_build_args_carries_voice_params() {
        let voice = VoiceId::MaleUk.params();
        let args = EspeakEngine::build_args(&voice, Path::new("/tmp/narration.wav"));

        assert_eq!(args[0], "-v");
        assert_eq!(args[1], "en-gb+m3");
        assert!(args.contains(&"-w".to_string()));
        assert!(args.contains(&"/tmp/narration.wav".to_string()));
    }

    #[test]
    fn test_estimate_duration_at_fixed_rate() {
        // 10 words at 2.5 words/second.
        let d = estimate_duration("one two three four five six seven eight nine ten");
        assert!((d - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_duration_empty_text() {
        assert_eq!(estimate_duration(""), 0.0);
    }
}
