//! Render requests, run stages and the final render report.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::{FilterKind, MusicSelection, TransitionKind, VoiceId, DEFAULT_WORDS_PER_SUBTITLE};

/// Unique identifier for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pipeline stage. Transitions are strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    #[default]
    Validating,
    PreprocessingImages,
    SynthesizingNarration,
    PlanningTiming,
    Compositing,
    MixingAudio,
    BurningSubtitles,
    Complete,
    Failed,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Validating => "validating",
            RunStage::PreprocessingImages => "preprocessing_images",
            RunStage::SynthesizingNarration => "synthesizing_narration",
            RunStage::PlanningTiming => "planning_timing",
            RunStage::Compositing => "compositing",
            RunStage::MixingAudio => "mixing_audio",
            RunStage::BurningSubtitles => "burning_subtitles",
            RunStage::Complete => "complete",
            RunStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStage::Complete | RunStage::Failed)
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional capabilities a run can complete without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Narration,
    Music,
    Subtitles,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Narration => "narration",
            Capability::Music => "music",
            Capability::Subtitles => "subtitles",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A capability that was skipped during a run, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SkippedCapability {
    pub capability: Capability,
    pub reason: String,
}

impl SkippedCapability {
    pub fn new(capability: Capability, reason: impl Into<String>) -> Self {
        Self {
            capability,
            reason: reason.into(),
        }
    }
}

/// Subtitle options for a render.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct SubtitleOptions {
    /// Words per caption block
    #[serde(default = "default_words_per_segment")]
    #[validate(range(min = 1, max = 20))]
    pub words_per_segment: usize,
}

fn default_words_per_segment() -> usize {
    DEFAULT_WORDS_PER_SUBTITLE
}

impl Default for SubtitleOptions {
    fn default() -> Self {
        Self {
            words_per_segment: DEFAULT_WORDS_PER_SUBTITLE,
        }
    }
}

/// A request to render a slideshow video.
///
/// Image bytes travel separately (multipart upload); this struct carries the
/// per-run options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct RenderRequest {
    /// Narration text; empty or absent renders a silent video
    #[validate(length(max = 5000))]
    pub audio_text: Option<String>,

    /// Narration voice
    #[serde(default)]
    pub voice: VoiceId,

    /// Fixed per-image display duration, seconds
    #[serde(default = "default_duration_per_image")]
    #[validate(range(min = 0.5, max = 60.0))]
    pub duration_per_image: f64,

    /// Derive per-image duration from narration length when possible
    #[serde(default = "default_true")]
    pub auto_duration: bool,

    /// Transition between images
    #[serde(default)]
    pub transition: TransitionKind,

    /// Filter applied to every image
    #[serde(default)]
    pub filter: FilterKind,

    /// Apply the enhancement pass after filtering
    #[serde(default)]
    pub enhance: bool,

    /// Background music selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub music: Option<MusicSelection>,

    /// Burned-in subtitles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub subtitles: Option<SubtitleOptions>,
}

fn default_duration_per_image() -> f64 {
    3.0
}

fn default_true() -> bool {
    true
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            audio_text: None,
            voice: VoiceId::default(),
            duration_per_image: default_duration_per_image(),
            auto_duration: true,
            transition: TransitionKind::default(),
            filter: FilterKind::default(),
            enhance: false,
            music: None,
            subtitles: None,
        }
    }
}

impl RenderRequest {
    /// Narration text with surrounding whitespace stripped, if non-empty.
    pub fn narration_text(&self) -> Option<&str> {
        self.audio_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// The terminal result of a successful run.
///
/// A run that completed with degraded features lists them in `skipped`;
/// the boolean flags reflect what actually made it into the artifact.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderReport {
    /// Run identifier
    pub run_id: RunId,

    /// Final artifact file name within the outputs area
    pub video_file: String,

    /// Final artifact size in bytes
    pub file_size_bytes: u64,

    /// Output resolution, e.g. "1280x720"
    pub resolution: String,

    /// Number of images that survived preprocessing
    pub image_count: usize,

    /// Display seconds per image
    pub per_image_duration: f64,

    /// Total video duration, seconds
    pub total_duration: f64,

    /// Whether auto-duration drove the timing plan
    pub auto_duration_used: bool,

    /// Whether the artifact carries a narration track
    pub has_audio: bool,

    /// Whether background music was mixed in
    pub has_music: bool,

    /// Whether subtitles were burned into the frames
    pub subtitles_applied: bool,

    /// Voice used for narration, when audio is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_used: Option<VoiceId>,

    /// Measured narration duration, seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration_duration: Option<f64>,

    pub transition: TransitionKind,
    pub filter: FilterKind,
    pub enhanced: bool,

    /// Optional capabilities skipped during the run
    pub skipped: Vec<SkippedCapability>,

    /// Completion timestamp
    pub created_at: DateTime<Utc>,
}

impl RenderReport {
    /// Whether every requested capability made it into the artifact.
    pub fn is_fully_featured(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn test_stage_terminality() {
        assert!(RunStage::Complete.is_terminal());
        assert!(RunStage::Failed.is_terminal());
        assert!(!RunStage::Compositing.is_terminal());
    }

    #[test]
    fn test_request_defaults() {
        let request: RenderRequest = serde_json::from_str("{}").unwrap();
        assert!((request.duration_per_image - 3.0).abs() < f64::EPSILON);
        assert!(request.auto_duration);
        assert_eq!(request.transition, TransitionKind::Fade);
        assert_eq!(request.filter, FilterKind::None);
    }

    #[test]
    fn test_narration_text_trims_empty() {
        let mut request = RenderRequest::default();
        assert!(request.narration_text().is_none());

        request.audio_text = Some("   ".to_string());
        assert!(request.narration_text().is_none());

        request.audio_text = Some("  hello world ".to_string());
        assert_eq!(request.narration_text(), Some("hello world"));
    }

    #[test]
    fn test_request_validation_bounds() {
        let mut request = RenderRequest::default();
        request.duration_per_image = 0.1;
        assert!(request.validate().is_err());

        request.duration_per_image = 3.0;
        assert!(request.validate().is_ok());
    }
}
