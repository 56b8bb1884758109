//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Invalid artifact name: {0}")]
    InvalidName(String),

    #[error("Unknown music track: {0}")]
    UnknownTrack(String),

    #[error("Placeholder synthesis failed: {0}")]
    PlaceholderFailed(String),

    #[error("Media error: {0}")]
    Media(#[from] scast_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName(name.into())
    }

    pub fn unknown_track(id: impl Into<String>) -> Self {
        Self::UnknownTrack(id.into())
    }
}
