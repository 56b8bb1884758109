//! Per-run workspace and stage tracking.

use std::path::{Path, PathBuf};
use tracing::warn;

use scast_models::{RunId, RunStage};

use crate::error::{PipelineError, PipelineResult};

/// Guard for a run's working directory of intermediate files.
///
/// Every intermediate artifact lives under this directory; removing it is
/// the run's entire cleanup. Prefer the explicit async [`cleanup`]; the Drop
/// implementation is the emergency path so no intermediate outlives the run
/// even on an early return.
///
/// [`cleanup`]: RunWorkspace::cleanup
pub struct RunWorkspace {
    dir: PathBuf,
    cleaned: bool,
}

impl RunWorkspace {
    /// Create the working directory for a run.
    pub async fn create(work_dir: &Path, run_id: &RunId) -> PipelineResult<Self> {
        let dir = work_dir.join(run_id.as_str());
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            cleaned: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a named intermediate inside the workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Remove the working directory and everything in it.
    pub async fn cleanup(mut self) {
        self.cleaned = true;
        if let Err(e) = tokio::fs::remove_dir_all(&self.dir).await {
            warn!("Failed to remove run workspace {}: {}", self.dir.display(), e);
        }
    }
}

impl Drop for RunWorkspace {
    fn drop(&mut self) {
        if !self.cleaned {
            if let Err(e) = std::fs::remove_dir_all(&self.dir) {
                warn!(
                    "Emergency cleanup of run workspace {} failed: {}",
                    self.dir.display(),
                    e
                );
            }
        }
    }
}

/// Enforces the strictly-forward stage order of a run.
#[derive(Debug)]
pub struct StageTracker {
    current: RunStage,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            current: RunStage::Validating,
        }
    }

    pub fn current(&self) -> RunStage {
        self.current
    }

    /// Advance to the next stage. Backward transitions are a logic error.
    pub fn advance(&mut self, next: RunStage) -> PipelineResult<()> {
        // Failed is reachable from anywhere; everything else must move forward.
        if next != RunStage::Failed && ordinal(next) <= ordinal(self.current) {
            return Err(PipelineError::stage_failed(
                self.current,
                format!("illegal transition to {}", next),
            ));
        }
        self.current = next;
        Ok(())
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn ordinal(stage: RunStage) -> u8 {
    match stage {
        RunStage::Validating => 0,
        RunStage::PreprocessingImages => 1,
        RunStage::SynthesizingNarration => 2,
        RunStage::PlanningTiming => 3,
        RunStage::Compositing => 4,
        RunStage::MixingAudio => 5,
        RunStage::BurningSubtitles => 6,
        RunStage::Complete => 7,
        RunStage::Failed => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_workspace_create_and_cleanup() {
        let dir = TempDir::new().unwrap();
        let run_id = RunId::new();
        let workspace = RunWorkspace::create(dir.path(), &run_id).await.unwrap();

        let frame = workspace.path("frame_000.jpg");
        tokio::fs::write(&frame, b"jpeg").await.unwrap();
        assert!(frame.exists());

        let run_dir = workspace.dir().to_path_buf();
        workspace.cleanup().await;
        assert!(!run_dir.exists());
    }

    #[tokio::test]
    async fn test_workspace_drop_removes_directory() {
        let dir = TempDir::new().unwrap();
        let run_id = RunId::new();
        let run_dir = {
            let workspace = RunWorkspace::create(dir.path(), &run_id).await.unwrap();
            tokio::fs::write(workspace.path("silent.mp4"), b"x").await.unwrap();
            workspace.dir().to_path_buf()
        };
        assert!(!run_dir.exists());
    }

    #[test]
    fn test_stages_advance_forward() {
        let mut tracker = StageTracker::new();
        for stage in [
            RunStage::PreprocessingImages,
            RunStage::SynthesizingNarration,
            RunStage::PlanningTiming,
            RunStage::Compositing,
            RunStage::MixingAudio,
            RunStage::BurningSubtitles,
            RunStage::Complete,
        ] {
            tracker.advance(stage).unwrap();
            assert_eq!(tracker.current(), stage);
        }
    }

    #[test]
    fn test_backward_transition_rejected() {
        let mut tracker = StageTracker::new();
        tracker.advance(RunStage::Compositing).unwrap();
        assert!(tracker.advance(RunStage::PreprocessingImages).is_err());
    }

    #[test]
    fn test_failed_reachable_from_any_stage() {
        let mut tracker = StageTracker::new();
        tracker.advance(RunStage::MixingAudio).unwrap();
        tracker.advance(RunStage::Failed).unwrap();
        assert_eq!(tracker.current(), RunStage::Failed);
    }
}
