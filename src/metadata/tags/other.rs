//! metadata/tags/other.rs
//! Frames this crate does not understand, carried through untouched.
//!
//! The sidecar cannot represent these, so the live container is their only
//! source of truth: they are re-read on every run and re-attached on every write.

use std::collections::BTreeMap;

use id3::frame::{Content, Frame};
use id3::Tag;

use super::{is_externally_managed, is_recognized};

/// Opaque bag of preserved frames, keyed by a stable identifier:
/// - `TXXX:<description>` / `WXXX:<description>` for user-defined frames
/// - the frame id otherwise
/// - `#n` suffix when the same key shows up again
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtherTags {
    frames: BTreeMap<String, Frame>,
}

impl OtherTags {
    /// Every frame in `tag` that is neither a recognized field nor owned by
    /// the lyrics/art reconcilers.
    pub fn from_tag(tag: &Tag) -> Self {
        let mut frames = BTreeMap::new();

        for frame in tag.frames() {
            let id = frame.id();
            if is_recognized(id) || is_externally_managed(id) {
                continue;
            }

            let base = frame_key(frame);
            let mut key = base.clone();
            let mut n = 1;
            while frames.contains_key(&key) {
                key = format!("{base}#{n}");
                n += 1;
            }
            frames.insert(key, frame.clone());
        }

        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.frames.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }

    /// Distinct frame ids present in the bag.
    pub(crate) fn frame_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.frames.values().map(Frame::id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub(crate) fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.values()
    }
}

fn frame_key(frame: &Frame) -> String {
    match frame.content() {
        Content::ExtendedText(et) => format!("{}:{}", frame.id(), et.description),
        Content::ExtendedLink(el) => format!("{}:{}", frame.id(), el.description),
        _ => frame.id().to_string(),
    }
}
