//! End-to-end slideshow rendering pipeline.
//!
//! This crate owns the run orchestration: stage sequencing, the per-run
//! working directory, the degradation policy for optional capabilities and
//! the bounded transcoder concurrency shared by all runs. The HTTP layer
//! above it is thin glue; the media crate below it is pure mechanism.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod narration;
pub mod orchestrator;
pub mod run;

pub use config::PipelineConfig;
pub use context::PipelineContext;
pub use error::{PipelineError, PipelineResult};
pub use logging::RunLogger;
pub use narration::NarrationAsset;
pub use orchestrator::{render_slideshow, ImageUpload};
pub use run::{RunWorkspace, StageTracker};
