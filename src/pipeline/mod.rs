//! pipeline/mod.rs
//! Background tasks around the metadata core: downloading new songs and
//! re-processing the library, with one shared status line.

pub mod download;
pub mod status;
pub mod worker;

pub use download::{DownloadSummary, Song, SongSource, download_missing};
pub use status::{StatusSnapshot, TaskGuard, TaskStatus};
pub use worker::{spawn_download, spawn_process};
