//! Application state.

use std::sync::Arc;
use tracing::warn;

use scast_media::EspeakEngine;
use scast_pipeline::{PipelineConfig, PipelineContext};
use scast_storage::StorageLayout;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<PipelineContext>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let layout = StorageLayout::init(&config.storage_root).await?;

        // A missing engine only degrades narration at request time; the
        // server still starts.
        let speech = EspeakEngine::discover().unwrap_or_else(|_| {
            warn!("No speech engine found on PATH, narration will be skipped");
            EspeakEngine::with_binary("espeak-ng")
        });

        let pipeline = PipelineContext::new(PipelineConfig::from_env(), layout, Arc::new(speech));

        Ok(Self {
            config,
            pipeline: Arc::new(pipeline),
            http: reqwest::Client::new(),
        })
    }
}
