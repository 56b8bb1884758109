//! Structured run logging.

use tracing::{error, info, warn, Span};

use scast_models::{RunId, RunStage};

/// Run logger for structured lifecycle events with consistent formatting.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
}

impl RunLogger {
    pub fn new(run_id: &RunId) -> Self {
        Self {
            run_id: run_id.to_string(),
        }
    }

    /// Log entry into a pipeline stage.
    pub fn log_stage(&self, stage: RunStage) {
        info!(run_id = %self.run_id, stage = %stage, "Entering stage");
    }

    /// Log a progress update within a stage.
    pub fn log_progress(&self, message: &str) {
        info!(run_id = %self.run_id, "Run progress: {}", message);
    }

    /// Log a degradation: the run continues without an optional capability.
    pub fn log_degraded(&self, message: &str) {
        warn!(run_id = %self.run_id, "Run degraded: {}", message);
    }

    /// Log a fatal run error.
    pub fn log_error(&self, message: &str) {
        error!(run_id = %self.run_id, "Run failed: {}", message);
    }

    /// Log run completion.
    pub fn log_completion(&self, message: &str) {
        info!(run_id = %self.run_id, "Run complete: {}", message);
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Create a tracing span for this run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("run", run_id = %self.run_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_carries_run_id() {
        let run_id = RunId::new();
        let logger = RunLogger::new(&run_id);
        assert_eq!(logger.run_id(), run_id.to_string());
    }
}
