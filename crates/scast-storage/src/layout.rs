//! On-disk storage layout.
//!
//! Three logical areas: uploads (source and intermediate images), outputs
//! (generated audio, video, subtitle files) and music (category-keyed track
//! library). Generated artifacts carry a semantic prefix plus a random
//! unique identifier and are retrievable by name through a single download
//! lookup that searches outputs first, then uploads.

use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};

/// Semantic prefix for a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Video,
    Audio,
    Image,
    Subtitles,
}

impl ArtifactKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Video => "video",
            ArtifactKind::Audio => "tts",
            ArtifactKind::Image => "img",
            ArtifactKind::Subtitles => "subs",
        }
    }

    /// Generate a unique artifact file name with this kind's prefix.
    pub fn unique_name(&self, extension: &str) -> String {
        format!("{}_{}.{}", self.prefix(), Uuid::new_v4(), extension)
    }
}

/// The shared storage areas.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    uploads: PathBuf,
    outputs: PathBuf,
    music: PathBuf,
}

impl StorageLayout {
    /// Create the layout under `root`, creating the area directories.
    pub async fn init(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref();
        let layout = Self {
            uploads: root.join("uploads"),
            outputs: root.join("outputs"),
            music: root.join("music"),
        };

        fs::create_dir_all(&layout.uploads).await?;
        fs::create_dir_all(&layout.outputs).await?;
        fs::create_dir_all(&layout.music).await?;

        Ok(layout)
    }

    pub fn uploads(&self) -> &Path {
        &self.uploads
    }

    pub fn outputs(&self) -> &Path {
        &self.outputs
    }

    pub fn music(&self) -> &Path {
        &self.music
    }

    /// Path for a named file in the uploads area.
    pub fn upload_path(&self, name: &str) -> PathBuf {
        self.uploads.join(name)
    }

    /// Path for a named file in the outputs area.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.outputs.join(name)
    }

    /// Resolve an artifact name for download, searching outputs then uploads.
    ///
    /// Names containing path separators or parent components are rejected.
    pub async fn resolve_download(&self, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
            return Err(StorageError::invalid_name(name));
        }

        for candidate in [self.output_path(name), self.upload_path(name)] {
            if fs::try_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(StorageError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_areas() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::init(dir.path()).await.unwrap();

        assert!(layout.uploads().is_dir());
        assert!(layout.outputs().is_dir());
        assert!(layout.music().is_dir());
    }

    #[test]
    fn test_unique_names_carry_prefix() {
        let name = ArtifactKind::Video.unique_name("mp4");
        assert!(name.starts_with("video_"));
        assert!(name.ends_with(".mp4"));
        assert_ne!(name, ArtifactKind::Video.unique_name("mp4"));
    }

    #[tokio::test]
    async fn test_resolve_searches_outputs_then_uploads() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::init(dir.path()).await.unwrap();

        fs::write(layout.upload_path("both.jpg"), b"upload").await.unwrap();
        fs::write(layout.output_path("both.jpg"), b"output").await.unwrap();

        let resolved = layout.resolve_download("both.jpg").await.unwrap();
        assert_eq!(resolved, layout.output_path("both.jpg"));

        fs::write(layout.upload_path("only_upload.jpg"), b"x").await.unwrap();
        let resolved = layout.resolve_download("only_upload.jpg").await.unwrap();
        assert_eq!(resolved, layout.upload_path("only_upload.jpg"));
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::init(dir.path()).await.unwrap();

        let err = layout.resolve_download("ghost.mp4").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::init(dir.path()).await.unwrap();

        for name in ["../secret", "a/b.mp4", "a\\b.mp4", ""] {
            let err = layout.resolve_download(name).await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidName(_)), "name: {}", name);
        }
    }
}
