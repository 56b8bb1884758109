//! Pipeline error types.
//!
//! Only failures with no safe degraded mode surface here; stages that can
//! degrade catch their own failures and report them as skipped capabilities
//! on the final render report instead.

use thiserror::Error;

use scast_models::RunStage;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No uploaded image survived decoding; the run never produces output.
    #[error("No valid images in request")]
    NoValidImages,

    /// A stage with no degraded mode failed.
    #[error("Stage {stage} failed: {message}")]
    StageFailed { stage: RunStage, message: String },

    #[error("Run cancelled")]
    Cancelled,

    #[error("Media error: {0}")]
    Media(#[from] scast_media::MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] scast_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn stage_failed(stage: RunStage, message: impl Into<String>) -> Self {
        Self::StageFailed {
            stage,
            message: message.into(),
        }
    }

    /// Whether this failure was caused by invalid caller input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, PipelineError::NoValidImages)
    }
}
