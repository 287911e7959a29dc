//! pipeline/download.rs
//! Fetch songs that are not in the library yet, then run the metadata
//! pipeline on each new file.
//!
//! The actual search/download backend lives behind [`SongSource`]; this module
//! only does the bookkeeping:
//! - skip songs whose output file already exists
//! - download on at most `threads` workers
//! - process every downloaded file
//! - report progress through the shared [`TaskStatus`]

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tracing::{error, info, warn};

use crate::error::Result;
use crate::metadata::Processor;

use super::status::TaskStatus;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub display_name: String,
    /// Where the backend will put the file. Used to skip existing songs.
    pub output_path: PathBuf,
}

/// Search + download backend.
pub trait SongSource: Send + Sync {
    fn search(&self, queries: &[String]) -> Result<Vec<Song>>;

    /// Download one song. `Ok(None)` means the backend gave up quietly.
    fn download(&self, song: &Song) -> Result<Option<PathBuf>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub requested: usize,
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl DownloadSummary {
    pub fn message(&self) -> String {
        let attempted = self.requested - self.skipped;
        format!(
            "Successfully downloaded {} out of {} {}. Failed to download {} {}.",
            self.succeeded,
            attempted,
            plural(attempted, "song", "songs"),
            self.failed,
            plural(self.failed, "song", "songs"),
        )
    }
}

pub fn download_missing(
    source: &dyn SongSource,
    processor: &Processor,
    queries: &[String],
    threads: usize,
    status: &TaskStatus,
) -> Result<DownloadSummary> {
    status.update(format!(
        "Searching for {} {}...",
        queries.len(),
        plural(queries.len(), "query", "queries")
    ));
    let songs = source.search(queries)?;
    info!("Found {} song(s)", songs.len());

    let (existing, to_download): (Vec<Song>, Vec<Song>) =
        songs.into_iter().partition(|s| s.output_path.exists());

    let mut summary = DownloadSummary {
        requested: existing.len() + to_download.len(),
        skipped: existing.len(),
        ..DownloadSummary::default()
    };

    if to_download.is_empty() {
        status.update("All songs already downloaded.");
        return Ok(summary);
    }

    let total = to_download.len();
    status.update(format!(
        "Downloading {total} {}...",
        plural(total, "song", "songs")
    ));

    let next = AtomicUsize::new(0);
    let done = Mutex::new(0usize);
    let workers = threads.clamp(1, total);

    let succeeded: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut ok = 0;
                    loop {
                        let idx = next.fetch_add(1, Ordering::Relaxed);
                        let Some(song) = to_download.get(idx) else {
                            break;
                        };

                        if fetch_one(source, processor, song) {
                            ok += 1;
                        }

                        let mut done = done.lock().unwrap_or_else(|p| p.into_inner());
                        *done += 1;
                        status.update(progress_message(*done, total, &song.display_name));
                    }
                    ok
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(0))
            .sum()
    });

    summary.succeeded = succeeded;
    summary.failed = total - succeeded;
    if summary.failed > 0 {
        warn!("{} download(s) failed", summary.failed);
    }
    status.update(summary.message());

    Ok(summary)
}

/// Download then process. `true` only when a file landed on disk.
fn fetch_one(source: &dyn SongSource, processor: &Processor, song: &Song) -> bool {
    match source.download(song) {
        Ok(Some(path)) => {
            processor.process_file(&path);
            true
        }
        Ok(None) => {
            warn!("Nothing downloaded for {}", song.display_name);
            false
        }
        Err(e) => {
            error!("Error downloading {}: {e}", song.display_name);
            false
        }
    }
}

fn progress_message(done: usize, total: usize, name: &str) -> String {
    let percent = done as f64 / total as f64 * 100.0;
    format!("Downloaded {percent:.2}% ({done}/{total}) - '{name}'")
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_has_two_decimals() {
        assert_eq!(
            progress_message(1, 2, "A - B"),
            "Downloaded 50.00% (1/2) - 'A - B'"
        );
        assert_eq!(progress_message(1, 3, "x"), "Downloaded 33.33% (1/3) - 'x'");
    }

    #[test]
    fn summary_message_counts_attempts_only() {
        let summary = DownloadSummary {
            requested: 5,
            skipped: 2,
            succeeded: 2,
            failed: 1,
        };
        assert_eq!(
            summary.message(),
            "Successfully downloaded 2 out of 3 songs. Failed to download 1 song."
        );
    }
}
