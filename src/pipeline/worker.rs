//! pipeline/worker.rs
//! Run a processing or download task on a background thread.
//!
//! The status is claimed *before* the thread starts, so a second request gets
//! `SyncError::Busy` straight away instead of racing the first one.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::error;

use crate::error::Result;
use crate::metadata::Processor;
use crate::metadata::types::DirectoryReport;

use super::download::{DownloadSummary, SongSource, download_missing};
use super::status::TaskStatus;

pub const PROCESS_DONE: &str = "Idle. Metadata processing complete.";
pub const DOWNLOAD_DONE: &str = "Idle. Download complete.";

/// Process every MP3 under `roots` in the background.
pub fn spawn_process(
    processor: Processor,
    roots: Vec<PathBuf>,
    status: &TaskStatus,
) -> Result<JoinHandle<Result<DirectoryReport>>> {
    let guard = status.try_begin("Processing metadata for all files...")?;

    Ok(thread::spawn(move || {
        let result = processor.process_roots(&roots);
        match &result {
            Ok(_) => guard.update(PROCESS_DONE),
            Err(e) => {
                error!("An error occurred in process thread: {e}");
                guard.update(format!("Error during processing: {e}"));
            }
        }
        result
    }))
}

/// Download whatever `queries` resolve to and is not on disk yet.
pub fn spawn_download(
    source: Arc<dyn SongSource>,
    processor: Processor,
    queries: Vec<String>,
    threads: usize,
    status: &TaskStatus,
) -> Result<JoinHandle<Result<DownloadSummary>>> {
    let guard = status.try_begin("Starting download...")?;

    Ok(thread::spawn(move || {
        let result = download_missing(
            source.as_ref(),
            &processor,
            &queries,
            threads,
            guard.status(),
        );
        match &result {
            Ok(_) => guard.update(DOWNLOAD_DONE),
            Err(e) => {
                error!("An error occurred in download thread: {e}");
                guard.update(format!("Error during download: {e}"));
            }
        }
        result
    }))
}
