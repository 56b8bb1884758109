//! On-disk storage for the Slidecast backend.
//!
//! This crate provides:
//! - The uploads/outputs/music storage areas
//! - Unique artifact naming with semantic prefixes
//! - Download resolution (outputs first, then uploads)
//! - The music library with lazily-generated placeholder tracks
//! - Cross-device-safe artifact moves

pub mod error;
pub mod fs;
pub mod layout;
pub mod music;

pub use error::{StorageError, StorageResult};
pub use fs::move_file;
pub use layout::{ArtifactKind, StorageLayout};
pub use music::MusicLibrary;
