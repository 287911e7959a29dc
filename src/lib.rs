//! musync: keep MP3 tags, lyrics and cover art in sync with their sidecar
//! files (`.json`, `.lrc`, `.jpg`).

pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod pipeline;

pub use config::Settings;
pub use error::{Result, SyncError};
pub use metadata::Processor;
