//! metadata/container.rs
//! The embedded tag container (ID3 inside the MP3) behind a small trait.
//!
//! Every reconciler does its own load -> mutate in memory -> save round trip.
//! Three round trips per file is accepted overhead: a failed save in one step
//! must not take the other steps down with it.

use std::path::Path;

use id3::{ErrorKind, Tag, Version};
use tracing::{debug, warn};

/// Load/save access to the embedded tag of one audio file.
///
/// `Id3Store` is the real thing. Tests swap in stores that fail on purpose.
pub trait TagStore: Send + Sync {
    /// `Ok(None)` means "the file has no tag at all".
    fn load(&self, path: &Path) -> Result<Option<Tag>, id3::Error>;

    fn save(&self, path: &Path, tag: &Tag) -> Result<(), id3::Error>;
}

/// `TagStore` backed by the `id3` crate.
#[derive(Debug, Clone, Copy)]
pub struct Id3Store {
    version: Version,
}

impl Id3Store {
    pub fn new(version: Version) -> Self {
        Self { version }
    }
}

impl Default for Id3Store {
    fn default() -> Self {
        Self::new(Version::Id3v24)
    }
}

impl TagStore for Id3Store {
    fn load(&self, path: &Path) -> Result<Option<Tag>, id3::Error> {
        match Tag::read_from_path(path) {
            Ok(tag) => Ok(Some(tag)),
            Err(id3::Error {
                kind: ErrorKind::NoTag,
                ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, path: &Path, tag: &Tag) -> Result<(), id3::Error> {
        tag.write_to_path(path, self.version)
    }
}

/// Load a tag for *reading* data out of it.
///
/// A corrupt tag is treated like a missing one: warn and return `None`.
pub(crate) fn load_for_read(store: &dyn TagStore, path: &Path) -> Option<Tag> {
    match store.load(path) {
        Ok(tag) => tag,
        Err(e) => {
            warn!("Could not read embedded tags from {}: {e}", path.display());
            None
        }
    }
}

/// Load a tag for *writing* into it. No tag (or an unreadable one) starts fresh.
pub(crate) fn load_for_write(store: &dyn TagStore, path: &Path) -> Tag {
    match store.load(path) {
        Ok(Some(tag)) => tag,
        Ok(None) => Tag::new(),
        Err(e) => {
            debug!("Starting a fresh tag for {}: {e}", path.display());
            Tag::new()
        }
    }
}
