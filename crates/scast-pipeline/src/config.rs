//! Pipeline configuration.

use std::path::PathBuf;

use scast_models::encoding::{FRAME_HEIGHT, FRAME_WIDTH};
use scast_models::EncodingConfig;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target frame width
    pub target_width: u32,
    /// Target frame height
    pub target_height: u32,
    /// Encoder settings
    pub encoding: EncodingConfig,
    /// Maximum concurrent FFmpeg processes across all runs
    pub max_ffmpeg_processes: usize,
    /// Timeout for a single FFmpeg invocation
    pub ffmpeg_timeout_secs: u64,
    /// Directory for per-run intermediate files
    pub work_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_width: FRAME_WIDTH,
            target_height: FRAME_HEIGHT,
            encoding: EncodingConfig::default(),
            max_ffmpeg_processes: 4,
            ffmpeg_timeout_secs: 600,
            work_dir: PathBuf::from("/tmp/slidecast"),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            target_width: defaults.target_width,
            target_height: defaults.target_height,
            encoding: EncodingConfig::default(),
            max_ffmpeg_processes: std::env::var("PIPELINE_MAX_FFMPEG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_ffmpeg_processes),
            ffmpeg_timeout_secs: std::env::var("PIPELINE_FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.ffmpeg_timeout_secs),
            work_dir: std::env::var("PIPELINE_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
        }
    }

    /// Output resolution as reported to callers, e.g. "1280x720".
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.target_width, self.target_height)
    }
}
