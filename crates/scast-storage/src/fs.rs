//! Filesystem helpers for artifact finalization.

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::StorageResult;

/// Move a file, falling back to copy-and-delete across filesystems.
///
/// The cross-device fallback copies to a sibling temp file and renames it
/// into place so the destination never observes a partial write.
pub async fn move_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> StorageResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        // EXDEV: rename cannot cross filesystems
        Err(e) if e.raw_os_error() == Some(18) => {
            debug!(
                "Cross-device move, copying: {} -> {}",
                src.display(),
                dst.display()
            );
            let staging = dst.with_extension("partial");
            fs::copy(src, &staging).await?;
            if let Err(e) = fs::rename(&staging, dst).await {
                let _ = fs::remove_file(&staging).await;
                return Err(e.into());
            }
            if let Err(e) = fs::remove_file(src).await {
                tracing::warn!("Failed to remove moved source {}: {}", src.display(), e);
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_move_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.mp4");
        let dst = dir.path().join("outputs").join("b.mp4");

        fs::write(&src, b"artifact").await.unwrap();
        move_file(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).await.unwrap(), b"artifact");
    }

    #[tokio::test]
    async fn test_move_overwrites_destination() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("new.mp4");
        let dst = dir.path().join("old.mp4");

        fs::write(&src, b"new").await.unwrap();
        fs::write(&dst, b"old").await.unwrap();
        move_file(&src, &dst).await.unwrap();

        assert_eq!(fs::read(&dst).await.unwrap(), b"new");
    }
}
