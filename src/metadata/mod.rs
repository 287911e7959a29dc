//! metadata/mod.rs
//!
//! The brain of the crate: keep each MP3's embedded tag and its sidecars
//! (`.json`, `.lrc`, `.jpg`) in sync.
//!
//! Pipeline for one file, always in this order:
//!   (A) tags   -> [`tags::process_tags`]
//!   (B) lyrics -> [`lyrics::process_lyrics`]
//!   (C) art    -> [`art::process_album_art`]
//!
//! Each step touches a disjoint set of frames and does its own
//! load/modify/save, so a failure in one never stops the next.
//!
//! Not thread-safe per file: two runs on the *same* file at once can lose
//! writes. Different files share nothing.

pub mod art;
pub mod container;
pub mod library;
pub mod lyrics;
pub mod tags;
pub mod timestamp;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::{LyricsOptions, Settings};
use crate::error::Result;

use container::{Id3Store, TagStore};
use types::{DirectoryReport, FileReport, StepResult};

/// Runs the three reconcilers. Cheap to clone; share one per run.
#[derive(Clone)]
pub struct Processor {
    store: Arc<dyn TagStore>,
    lyrics: LyricsOptions,
}

impl Processor {
    /// Real ID3 files, default options.
    pub fn new() -> Self {
        Self::with_store(Arc::new(Id3Store::default()), LyricsOptions::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_store(
            Arc::new(Id3Store::new(settings.tag_version.into())),
            settings.lyrics.clone(),
        )
    }

    pub fn with_store(store: Arc<dyn TagStore>, lyrics: LyricsOptions) -> Self {
        Self { store, lyrics }
    }

    /// Tags, then lyrics, then art. Never fails as a whole; see the report.
    pub fn process_file(&self, path: &Path) -> FileReport {
        let store = self.store.as_ref();

        let report = FileReport {
            path: path.to_path_buf(),
            tags: tags::process_tags(store, path),
            lyrics: lyrics::process_lyrics(store, path, &self.lyrics),
            art: art::process_album_art(store, path),
        };

        for (step, result) in report.steps() {
            log_step(path, step, result);
        }
        report
    }

    /// Every `.mp3` under `root`, recursively. Only a failed scan is an error.
    pub fn process_directory(&self, root: &Path) -> Result<DirectoryReport> {
        let paths = library::scan_mp3s(root)?;
        Ok(self.process_paths(paths))
    }

    /// Like [`Processor::process_directory`], over several (possibly
    /// overlapping) roots.
    pub fn process_roots(&self, roots: &[PathBuf]) -> Result<DirectoryReport> {
        let paths = library::scan_paths(roots)?;
        Ok(self.process_paths(paths))
    }

    fn process_paths(&self, paths: Vec<PathBuf>) -> DirectoryReport {
        let total = paths.len();
        info!("Processing {total} file(s)");

        let mut report = DirectoryReport::default();
        for (idx, path) in paths.into_iter().enumerate() {
            info!(
                "Processing file {}/{}: {}",
                idx + 1,
                total,
                library::display_name(&path)
            );
            report.files.push(self.process_file(&path));
        }

        if report.failed_files() > 0 {
            warn!(
                "{} of {} file(s) had failed steps",
                report.failed_files(),
                total
            );
        }
        report
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

fn log_step(path: &Path, step: &str, result: &StepResult) {
    if let Err(e) = result {
        error!("{step} step failed for {}: {e}", path.display());
    }
}
