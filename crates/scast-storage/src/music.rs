//! Music library over the static track catalog.
//!
//! Track files live in the music storage area. A referenced track whose file
//! is absent gets a synthesized placeholder tone of matching duration,
//! persisted under the catalog file name so the identifier stays resolvable
//! in future runs. Placeholder writes are atomic renames, so concurrent runs
//! generating the same placeholder cannot corrupt it; last write wins.

use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

use scast_media::{synthesize_tone, FfmpegRunner};
use scast_models::music::{track_by_id, MusicTrack, PLACEHOLDER_TONE_HZ};

use crate::error::{StorageError, StorageResult};
use crate::layout::StorageLayout;

/// Category-keyed track library with lazily-generated placeholders.
#[derive(Debug, Clone)]
pub struct MusicLibrary {
    layout: StorageLayout,
}

impl MusicLibrary {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    /// Path of a catalog track inside the music area.
    pub fn track_path(&self, track: &MusicTrack) -> PathBuf {
        self.layout.music().join(track.file_name)
    }

    /// Resolve a track identifier to an on-disk file, synthesizing a
    /// placeholder tone when the real track is missing.
    pub async fn ensure_track(&self, track_id: &str) -> StorageResult<PathBuf> {
        let track = track_by_id(track_id).ok_or_else(|| StorageError::unknown_track(track_id))?;
        let path = self.track_path(track);

        if tokio::fs::try_exists(&path).await? {
            return Ok(path);
        }

        warn!(
            track_id,
            "Music track missing, synthesizing placeholder tone"
        );

        // Unique staging name per writer; the rename keeps concurrent
        // generators from ever exposing a partial file.
        let staging = self
            .layout
            .music()
            .join(format!(".{}.{}.partial", track.file_name, Uuid::new_v4()));

        synthesize_tone(
            PLACEHOLDER_TONE_HZ,
            track.duration_secs,
            &staging,
            &FfmpegRunner::new(),
        )
        .await
        .map_err(|e| StorageError::PlaceholderFailed(e.to_string()))?;

        tokio::fs::rename(&staging, &path).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_existing_track_resolves_without_synthesis() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::init(dir.path()).await.unwrap();
        let library = MusicLibrary::new(layout.clone());

        let track = track_by_id("calm_waves").unwrap();
        let path = layout.music().join(track.file_name);
        tokio::fs::write(&path, b"mp3 bytes").await.unwrap();

        let resolved = library.ensure_track("calm_waves").await.unwrap();
        assert_eq!(resolved, path);
        assert_eq!(tokio::fs::read(&resolved).await.unwrap(), b"mp3 bytes");
    }

    #[tokio::test]
    async fn test_unknown_track_rejected() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::init(dir.path()).await.unwrap();
        let library = MusicLibrary::new(layout);

        let err = library.ensure_track("no_such_track").await.unwrap_err();
        assert!(matches!(err, StorageError::UnknownTrack(_)));
    }

    #[test]
    fn test_track_path_uses_catalog_file_name() {
        let track = track_by_id("upbeat_sunrise").unwrap();
        assert_eq!(track.file_name, "upbeat_sunrise.mp3");
    }
}
