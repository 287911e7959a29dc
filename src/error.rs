//! error.rs
//! Error types shared by the reconcilers, the orchestrator and the pipeline.
//!
//! "Nothing found" is NOT an error here. Reconcilers return
//! `Ok(Outcome::NotFound)` for a missing source, and `Err(SyncError)` only when
//! something real went wrong (bad sidecar, failed save, failed scan).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// A sidecar exists but could not be read or parsed.
    /// Never falls back to the container: the sidecar is operator intent.
    #[error("malformed sidecar {}: {reason}", path.display())]
    MalformedSidecar { path: PathBuf, reason: String },

    #[error("failed to save tags to {}: {source}", path.display())]
    ContainerWrite {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    #[error("failed to write sidecar {}: {source}", path.display())]
    SidecarWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reported by the external song source (search or download).
    #[error("song acquisition failed: {0}")]
    Acquisition(String),

    #[error("a task is already running")]
    Busy,
}

impl SyncError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SyncError::MalformedSidecar {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn container_write(path: impl Into<PathBuf>, source: id3::Error) -> Self {
        SyncError::ContainerWrite {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn sidecar_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SyncError::SidecarWrite {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
