//! Axum HTTP API server.
//!
//! Thin I/O glue over the rendering pipeline:
//! - Multipart video creation and image processing
//! - Standalone speech synthesis
//! - Static voice and music catalogs
//! - Stock photo proxying
//! - Artifact downloads

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
