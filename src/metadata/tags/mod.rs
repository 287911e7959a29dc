//! metadata/tags/mod.rs
//!
//! Tag reconciler: `.json` sidecar <-> ID3 frames.
//!
//! Public API:
//! - [`Tags`]: the recognized fields + an opaque [`OtherTags`] bag
//! - [`read_tags`] / [`embed_tags`]: container <-> `Tags`
//! - [`to_json`] / [`from_json`]: sidecar <-> `Tags`
//! - [`process_tags`]: the whole read -> write-both round trip for one file
//!
//! Precedence:
//! - sidecar present: it owns the recognized fields; `other_tags` still comes
//!   from the container (the sidecar cannot hold them)
//! - no sidecar: everything comes from the container

mod other;
mod read;
mod sidecar;
mod util;
mod write;

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SyncError;

use super::container::{TagStore, load_for_read, load_for_write};
use super::library::{display_name, json_path};
use super::types::{Outcome, StepResult};

pub use other::OtherTags;
pub use read::read_tags;
pub use sidecar::{SidecarError, from_json, to_json};
pub use write::embed_tags;

/// Frames owned by the lyrics and art reconcilers. Never touched here, never
/// preserved as "other". (3-char ids are the ID3v2.2 spellings.)
pub const MANAGED_EXTERNALLY: &[&str] = &["APIC", "PIC", "USLT", "ULT", "SYLT", "SLT"];

/// Frames mapped onto `Tags` fields. Fully replaced on every write.
pub const RECOGNIZED_FRAMES: &[&str] = &[
    "TIT2", "TPE1", "TALB", "TPE2", "TRCK", "TPOS", "TDRC", "TCOP", "TCON", "TSRC", "TENC",
    "TSSE", "WOAS", "COMM", "POPM",
];

pub(crate) fn is_recognized(id: &str) -> bool {
    RECOGNIZED_FRAMES.contains(&id)
}

pub(crate) fn is_externally_managed(id: &str) -> bool {
    MANAGED_EXTERNALLY.contains(&id)
}

/// The recognized metadata of one track.
///
/// Serialized as the `.json` sidecar: `None` fields are omitted, unknown keys
/// are rejected, and `other_tags` never appears.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    /// TRCK text as-is ("3" or "3/12").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// TPOS text as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder_settings: Option<String>,
    /// POPM rating byte (0-255).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,

    #[serde(skip)]
    pub other_tags: OtherTags,
}

/// Reconcile tags for one MP3: read (sidecar first), write container, write sidecar.
pub fn process_tags(store: &dyn TagStore, path: &Path) -> StepResult {
    let json = json_path(path);

    let tags = if json.exists() {
        let text = fs::read_to_string(&json).map_err(|e| SyncError::malformed(&json, e))?;
        let mut tags = from_json(&text).map_err(|e| SyncError::malformed(&json, e))?;

        // The sidecar never defines these; always take them from the live file.
        if let Some(tag) = load_for_read(store, path) {
            tags.other_tags = OtherTags::from_tag(&tag);
        }
        Some(tags)
    } else {
        load_for_read(store, path).map(|tag| read_tags(&tag))
    };

    let Some(tags) = tags else {
        info!("Could not parse any tags for {}, skipping", display_name(path));
        return Ok(Outcome::NotFound);
    };

    let mut tag = load_for_write(store, path);
    embed_tags(&mut tag, &tags);
    store
        .save(path, &tag)
        .map_err(|e| SyncError::container_write(path, e))?;
    debug!(
        "Embedded tags into {} ({} preserved frames)",
        path.display(),
        tags.other_tags.len()
    );

    let body = to_json(&tags).map_err(|e| SyncError::sidecar_write(&json, io::Error::other(e)))?;
    fs::write(&json, body).map_err(|e| SyncError::sidecar_write(&json, e))?;

    info!("Processed and synced tags for {}", display_name(path));
    Ok(Outcome::Synced)
}
