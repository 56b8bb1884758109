//! External media capabilities for the Slidecast pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with multi-input support
//! - A runner with timeout and cancellation over `tokio::process`
//! - FFprobe duration/stream probing
//! - Image decode, pixel filters, enhancement and resizing
//! - Silent slideshow composition (concat and cross-fade paths)
//! - Audio mixing with pad/trim and music fade
//! - Subtitle burn-in
//! - A speech-engine capability trait with a process-backed implementation
//! - Placeholder tone synthesis

pub mod burn;
pub mod command;
pub mod compose;
pub mod error;
pub mod filters;
pub mod mix;
pub mod preprocess;
pub mod probe;
pub mod speech;
pub mod tone;

pub use burn::{burn_subtitles, SubtitleStyle};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use compose::compose_slideshow;
pub use error::{MediaError, MediaResult};
pub use filters::{apply_enhancement, apply_filter};
pub use mix::merge_audio;
pub use preprocess::{decode_image, encode_jpeg, preprocess_image, write_frame};
pub use probe::{probe_duration, probe_media, MediaProbe};
pub use speech::{estimate_duration, EspeakEngine, SpeechEngine};
pub use tone::synthesize_tone;
