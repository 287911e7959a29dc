//! metadata/tags/write.rs
//! Write a `Tags` into an ID3 tag.
//!
//! Recognized frames are fully replaced, not merged: every one of them is
//! removed first, so frames cannot pile up across runs and a field that is
//! `None` really disappears from the file.

use id3::frame::{Comment, Frame, Popularimeter};
use id3::{Tag, TagLike};
use tracing::debug;

use super::{RECOGNIZED_FRAMES, Tags};

pub fn embed_tags(tag: &mut Tag, tags: &Tags) {
    for id in RECOGNIZED_FRAMES {
        let _ = tag.remove(*id);
    }

    set_text_opt(tag, "TIT2", &tags.title);
    set_text_opt(tag, "TPE1", &tags.artist);
    set_text_opt(tag, "TALB", &tags.album);
    set_text_opt(tag, "TPE2", &tags.album_artist);
    set_text_opt(tag, "TRCK", &tags.track);
    set_text_opt(tag, "TPOS", &tags.disc);
    set_text_opt(tag, "TDRC", &tags.recording_date);
    set_text_opt(tag, "TCOP", &tags.copyright);
    set_text_opt(tag, "TCON", &tags.genre);
    set_text_opt(tag, "TSRC", &tags.isrc);
    set_text_opt(tag, "TENC", &tags.encoder);
    set_text_opt(tag, "TSSE", &tags.encoder_settings);

    if let Some(rating) = tags.popularity {
        let _ = tag.add_frame(Popularimeter {
            user: String::new(),
            rating,
            counter: 0,
        });
    }

    // Origin URL: one slot, Spotify preferred.
    if let Some(url) = tags.spotify_url.as_ref().or(tags.youtube_url.as_ref()) {
        let _ = tag.add_frame(Frame::link("WOAS", url.as_str()));
    }

    let comment = combined_comment(tags);
    if !comment.is_empty() {
        let _ = tag.add_frame(Comment {
            lang: "eng".to_string(),
            description: String::new(),
            text: comment,
        });
    }

    // Preserved frames go back in place of whatever the live tag holds for
    // the same ids (which, read fresh, is the same set).
    for id in tags.other_tags.frame_ids() {
        let _ = tag.remove(id);
    }
    for frame in tags.other_tags.frames() {
        debug!("Preserved frame {}", frame.id());
        let _ = tag.add_frame(frame.clone());
    }
}

/// Comment text followed by each URL on its own line, trimmed.
fn combined_comment(tags: &Tags) -> String {
    let mut text = tags.comment.clone().unwrap_or_default();
    for url in [&tags.spotify_url, &tags.youtube_url].into_iter().flatten() {
        text.push('\n');
        text.push_str(url);
    }
    text.trim().to_string()
}

/// Add a text frame for a non-empty value.
fn set_text_opt(tag: &mut Tag, id: &str, v: &Option<String>) {
    if let Some(s) = v.as_deref().filter(|s| !s.is_empty()) {
        tag.set_text(id, s);
    }
}
