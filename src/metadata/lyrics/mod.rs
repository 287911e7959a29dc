//! metadata/lyrics/mod.rs
//!
//! Lyrics reconciler: `.lrc` sidecar <-> USLT/SYLT frames.
//!
//! Pipeline for one file:
//!   (A) pick a source: `.lrc` if it exists, else embedded SYLT, else embedded USLT
//!   (B) parse into `Vec<LyricLine>`
//!   (C) clean (trim + drop leading credit lines)
//!   (D) write `.lrc` and the embedded frames (each per its `WriteMode`)
//!
//! A broken `.lrc` is an error and does NOT fall back to the embedded lyrics;
//! stale embedded data must never silently win over a sidecar someone edited.

mod embedded;
mod parse;
mod serialize;

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{LyricsOptions, WriteMode};
use crate::error::SyncError;

use super::container::{TagStore, load_for_read, load_for_write};
use super::library::{display_name, lrc_path};
use super::types::{LyricLine, Outcome, StepResult};

pub use embedded::{embed_lyrics, read_embedded_lyrics, remove_lyrics_frames};
pub use parse::{clean_lyrics, parse_lyrics, trim_lyrics};
pub use serialize::{has_timestamps, to_lrc, to_plain, to_synced};

/// Reconcile lyrics for one MP3.
pub fn process_lyrics(store: &dyn TagStore, path: &Path, options: &LyricsOptions) -> StepResult {
    let Some(raw) = read_source(store, path)?.filter(|lines| !lines.is_empty()) else {
        info!("No lyrics found for {}, skipping", display_name(path));
        if options.remove_embedded_when_missing {
            strip_embedded(store, path)?;
        }
        return Ok(Outcome::NotFound);
    };

    let lines = if options.keep_credits {
        trim_lyrics(raw)
    } else {
        clean_lyrics(raw)
    };

    apply_lrc(path, &lines, options.lrc)?;
    apply_embedded(store, path, &lines, options.embed)?;

    info!("Synced {} lyric lines for {}", lines.len(), display_name(path));
    Ok(Outcome::Synced)
}

/// (A) + (B): sidecar first, container second.
fn read_source(store: &dyn TagStore, path: &Path) -> Result<Option<Vec<LyricLine>>, SyncError> {
    let lrc = lrc_path(path);

    if lrc.exists() {
        let text = fs::read_to_string(&lrc).map_err(|e| SyncError::malformed(&lrc, e))?;
        return Ok(Some(parse_lyrics(&text)));
    }

    Ok(load_for_read(store, path)
        .as_ref()
        .and_then(read_embedded_lyrics))
}

fn apply_lrc(path: &Path, lines: &[LyricLine], mode: WriteMode) -> Result<(), SyncError> {
    let lrc = lrc_path(path);

    match mode {
        WriteMode::Write => {
            fs::write(&lrc, to_lrc(lines)).map_err(|e| SyncError::sidecar_write(&lrc, e))?;
        }
        WriteMode::Delete if lrc.exists() => {
            fs::remove_file(&lrc).map_err(|e| SyncError::sidecar_write(&lrc, e))?;
            info!("Deleted {}", lrc.display());
        }
        WriteMode::Delete | WriteMode::Leave => {}
    }

    Ok(())
}

fn apply_embedded(
    store: &dyn TagStore,
    path: &Path,
    lines: &[LyricLine],
    mode: WriteMode,
) -> Result<(), SyncError> {
    match mode {
        WriteMode::Write => {
            let mut tag = load_for_write(store, path);
            embed_lyrics(&mut tag, lines);
            store
                .save(path, &tag)
                .map_err(|e| SyncError::container_write(path, e))?;
            debug!("Embedded lyrics into {}", path.display());
            Ok(())
        }
        WriteMode::Delete => strip_embedded(store, path),
        WriteMode::Leave => Ok(()),
    }
}

/// Remove USLT/SYLT frames, if there is a tag holding any.
fn strip_embedded(store: &dyn TagStore, path: &Path) -> Result<(), SyncError> {
    let Some(mut tag) = load_for_read(store, path) else {
        return Ok(());
    };
    if !tag.frames().any(|f| f.id() == "USLT" || f.id() == "SYLT") {
        return Ok(());
    }

    remove_lyrics_frames(&mut tag);
    store
        .save(path, &tag)
        .map_err(|e| SyncError::container_write(path, e))?;
    info!("Removed embedded lyrics from {}", path.display());
    Ok(())
}
