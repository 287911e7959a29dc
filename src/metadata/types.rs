//! metadata/types.rs
//! Plain data shared between the reconcilers and their callers.
//!
//! Rule of thumb (same as the rest of `metadata`):
//! - boring bags of data
//! - no tag parsing, no filesystem code

use std::path::PathBuf;

use crate::error::SyncError;

/// One line of lyrics.
///
/// - `timestamp_ms: None` = unsynced line. It still has to be written somewhere
///   (as bare text in the `.lrc`, inside the USLT frame), never dropped.
/// - Order in a `Vec<LyricLine>` is playback order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub timestamp_ms: Option<u32>,
    pub text: String,
}

impl LyricLine {
    pub fn timed(timestamp_ms: u32, text: impl Into<String>) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            text: text.into(),
        }
    }

    pub fn untimed(text: impl Into<String>) -> Self {
        Self {
            timestamp_ms: None,
            text: text.into(),
        }
    }
}

/// What a reconciler step did, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Source found, sidecar + container written.
    Synced,
    /// Nothing usable anywhere. Logged and skipped; not an error.
    NotFound,
}

pub type StepResult = Result<Outcome, SyncError>;

/// Result of running all three reconcilers on one file.
///
/// Every step always runs; a failed step never hides the others.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub tags: StepResult,
    pub lyrics: StepResult,
    pub art: StepResult,
}

impl FileReport {
    pub fn steps(&self) -> [(&'static str, &StepResult); 3] {
        [
            ("tags", &self.tags),
            ("lyrics", &self.lyrics),
            ("art", &self.art),
        ]
    }

    pub fn failures(&self) -> usize {
        self.steps().iter().filter(|(_, r)| r.is_err()).count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

/// Result of processing a whole directory tree.
#[derive(Debug, Default)]
pub struct DirectoryReport {
    pub files: Vec<FileReport>,
}

impl DirectoryReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Files with at least one failed step.
    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|f| !f.is_clean()).count()
    }

    pub fn step_failures(&self) -> usize {
        self.files.iter().map(FileReport::failures).sum()
    }
}
