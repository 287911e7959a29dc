//! pipeline/status.rs
//! Shared "what is the background task doing" handle.
//!
//! One `TaskStatus` is created by the caller and passed to whatever needs it
//! (workers write, front ends poll). At most one task holds it at a time.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::info;

use crate::error::{Result, SyncError};

pub const IDLE_MESSAGE: &str = "Idle. Ready to accept tasks.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub is_running: bool,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct TaskStatus {
    inner: Arc<Mutex<StatusSnapshot>>,
}

impl TaskStatus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StatusSnapshot {
                is_running: false,
                message: IDLE_MESSAGE.to_string(),
            })),
        }
    }

    /// Claim the status for a new task, or `SyncError::Busy`.
    ///
    /// The returned guard releases it (`is_running = false`) when dropped,
    /// including on early returns and panics inside the task.
    pub fn try_begin(&self, message: impl Into<String>) -> Result<TaskGuard> {
        let mut state = self.lock();
        if state.is_running {
            return Err(SyncError::Busy);
        }
        state.is_running = true;
        state.message = message.into();
        info!("Status Updated: {}", state.message);

        Ok(TaskGuard {
            status: self.clone(),
        })
    }

    pub fn update(&self, message: impl Into<String>) {
        let mut state = self.lock();
        state.message = message.into();
        info!("Status Updated: {}", state.message);
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running
    }

    // A panicking writer cannot leave the snapshot half-updated, so a
    // poisoned lock is still safe to read.
    fn lock(&self) -> MutexGuard<'_, StatusSnapshot> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that the caller owns the status. Releases it on drop.
#[derive(Debug)]
pub struct TaskGuard {
    status: TaskStatus,
}

impl TaskGuard {
    pub fn update(&self, message: impl Into<String>) {
        self.status.update(message);
    }

    pub fn status(&self) -> &TaskStatus {
        &self.status
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.status.lock().is_running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let status = TaskStatus::new();
        assert_eq!(
            status.snapshot(),
            StatusSnapshot {
                is_running: false,
                message: IDLE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn second_claim_is_busy_until_guard_drops() {
        let status = TaskStatus::new();
        let guard = status.try_begin("Processing...").unwrap();
        assert!(status.is_running());
        assert!(matches!(status.try_begin("again"), Err(SyncError::Busy)));

        guard.update("Halfway");
        assert_eq!(status.snapshot().message, "Halfway");

        drop(guard);
        assert!(!status.is_running());
        assert_eq!(status.snapshot().message, "Halfway");
        assert!(status.try_begin("again").is_ok());
    }

    #[test]
    fn clones_share_state() {
        let status = TaskStatus::new();
        let other = status.clone();
        let _guard = status.try_begin("x").unwrap();
        assert!(other.is_running());
    }
}
