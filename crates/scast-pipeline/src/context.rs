//! Shared pipeline context.
//!
//! All capabilities are explicitly constructed and injected here once at
//! process start; request handlers never touch global state.

use std::sync::Arc;
use tokio::sync::{watch, Semaphore};

use scast_media::{FfmpegRunner, SpeechEngine};
use scast_storage::{MusicLibrary, StorageLayout};

use crate::config::PipelineConfig;

/// Capabilities and shared resources for pipeline runs.
#[derive(Clone)]
pub struct PipelineContext {
    pub config: PipelineConfig,
    pub layout: StorageLayout,
    pub music: MusicLibrary,
    pub speech: Arc<dyn SpeechEngine>,
    ffmpeg_slots: Arc<Semaphore>,
}

impl PipelineContext {
    /// Create the context. `speech` is the injected synthesis capability.
    pub fn new(
        config: PipelineConfig,
        layout: StorageLayout,
        speech: Arc<dyn SpeechEngine>,
    ) -> Self {
        let ffmpeg_slots = Arc::new(Semaphore::new(config.max_ffmpeg_processes));
        let music = MusicLibrary::new(layout.clone());
        Self {
            config,
            layout,
            music,
            speech,
            ffmpeg_slots,
        }
    }

    /// Acquire a transcoder slot; bounds concurrent FFmpeg spawns across runs.
    pub async fn acquire_ffmpeg_slot(&self) -> tokio::sync::OwnedSemaphorePermit {
        Arc::clone(&self.ffmpeg_slots)
            .acquire_owned()
            .await
            .expect("ffmpeg semaphore closed")
    }

    /// Runner wired with this context's timeout and the run's cancel token.
    pub fn runner(&self, cancel: &watch::Receiver<bool>) -> FfmpegRunner {
        FfmpegRunner::new()
            .with_timeout(self.config.ffmpeg_timeout_secs)
            .with_cancel(cancel.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scast_media::EspeakEngine;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_slots_bounded_by_config() {
        let dir = TempDir::new().unwrap();
        let layout = StorageLayout::init(dir.path()).await.unwrap();
        let config = PipelineConfig {
            max_ffmpeg_processes: 2,
            ..PipelineConfig::default()
        };
        let ctx = PipelineContext::new(
            config,
            layout,
            Arc::new(EspeakEngine::with_binary("/usr/bin/espeak-ng")),
        );

        let first = ctx.acquire_ffmpeg_slot().await;
        let _second = ctx.acquire_ffmpeg_slot().await;
        assert_eq!(ctx.ffmpeg_slots.available_permits(), 0);

        drop(first);
        assert_eq!(ctx.ffmpeg_slots.available_permits(), 1);
    }
}
