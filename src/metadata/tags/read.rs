//! metadata/tags/read.rs
//! Read ID3 frames into a `Tags`.
//!
//! - Text frames -> `Option<String>` (missing or empty -> `None`)
//! - POPM rating -> `popularity`
//! - WOAS, then every COMM, feed `spotify_url` / `youtube_url`
//!   (comments are scanned last, so a URL found there wins)
//! - Everything else that is not lyrics/art -> `other_tags`

use id3::frame::Content;
use id3::{Tag, TagLike};

use super::Tags;
use super::other::OtherTags;
use super::util::{Service, classify_url, split_comment_urls};

pub fn read_tags(tag: &Tag) -> Tags {
    let mut tags = Tags {
        title: text_frame(tag, "TIT2"),
        artist: text_frame(tag, "TPE1"),
        album: text_frame(tag, "TALB"),
        album_artist: text_frame(tag, "TPE2"),
        track: text_frame(tag, "TRCK"),
        disc: text_frame(tag, "TPOS"),
        recording_date: text_frame(tag, "TDRC"),
        copyright: text_frame(tag, "TCOP"),
        genre: text_frame(tag, "TCON"),
        isrc: text_frame(tag, "TSRC"),
        encoder: text_frame(tag, "TENC"),
        encoder_settings: text_frame(tag, "TSSE"),
        popularity: popm_rating(tag),
        other_tags: OtherTags::from_tag(tag),
        ..Tags::default()
    };

    if let Some(url) = origin_url(tag) {
        assign_url(&mut tags, url);
    }

    let mut comments: Vec<String> = Vec::new();
    for frame in tag.frames() {
        let Content::Comment(c) = frame.content() else {
            continue;
        };

        let (urls, rest) = split_comment_urls(&c.text);
        for url in urls {
            assign_url(&mut tags, url);
        }
        if !rest.is_empty() {
            comments.push(rest);
        }
    }
    if !comments.is_empty() {
        tags.comment = Some(comments.join("\n"));
    }

    tags
}

/// Text content of a frame, if it is a non-empty text-ish frame.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) | Content::Link(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn origin_url(tag: &Tag) -> Option<&str> {
    match tag.get("WOAS")?.content() {
        Content::Link(url) => Some(url.as_str()),
        _ => None,
    }
}

fn popm_rating(tag: &Tag) -> Option<u8> {
    tag.frames().find_map(|frame| match frame.content() {
        Content::Popularimeter(p) => Some(p.rating),
        _ => None,
    })
}

fn assign_url(tags: &mut Tags, url: &str) {
    match classify_url(url) {
        Some(Service::Spotify) => tags.spotify_url = Some(url.to_string()),
        Some(Service::YoutubeMusic) => tags.youtube_url = Some(url.to_string()),
        None => {}
    }
}
