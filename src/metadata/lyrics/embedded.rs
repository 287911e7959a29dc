//! metadata/lyrics/embedded.rs
//! Lyrics frames inside the ID3 tag: SYLT (synced) and USLT (unsynced).

use id3::frame::{
    Content, Lyrics, SynchronisedLyrics, SynchronisedLyricsType, TimestampFormat,
};
use id3::{Tag, TagLike};

use super::super::types::LyricLine;
use super::parse::parse_lyrics;
use super::serialize::{has_timestamps, to_plain, to_synced};

const LYRICS_LANG: &str = "eng";

/// Pull lyrics out of a tag.
///
/// - SYLT wins if it yields any line.
/// - Otherwise USLT text goes through the normal line parser, so plain text
///   that happens to carry `[MM:SS.ff]` prefixes is still understood.
pub fn read_embedded_lyrics(tag: &Tag) -> Option<Vec<LyricLine>> {
    let synced: Vec<LyricLine> = tag
        .frames()
        .filter_map(|f| match f.content() {
            Content::SynchronisedLyrics(sylt) => Some(sylt),
            _ => None,
        })
        .flat_map(|sylt| sylt.content.iter())
        .map(|(ms, text)| LyricLine::timed(*ms, text.trim()))
        .collect();

    if !synced.is_empty() {
        return Some(synced);
    }

    let unsynced: Vec<&str> = tag
        .frames()
        .filter_map(|f| match f.content() {
            Content::Lyrics(l) if !l.text.is_empty() => Some(l.text.as_str()),
            _ => None,
        })
        .collect();

    let lines = parse_lyrics(&unsynced.join("\n"));
    if lines.is_empty() { None } else { Some(lines) }
}

/// Replace all lyrics frames with one USLT and (if anything is timed) one SYLT.
pub fn embed_lyrics(tag: &mut Tag, lines: &[LyricLine]) {
    remove_lyrics_frames(tag);

    let _ = tag.add_frame(Lyrics {
        lang: LYRICS_LANG.to_string(),
        description: String::new(),
        text: to_plain(lines),
    });

    if has_timestamps(lines) {
        let _ = tag.add_frame(SynchronisedLyrics {
            lang: LYRICS_LANG.to_string(),
            timestamp_format: TimestampFormat::Ms,
            content_type: SynchronisedLyricsType::Lyrics,
            description: String::new(),
            content: to_synced(lines),
        });
    }
}

/// Drop every USLT and SYLT frame.
pub fn remove_lyrics_frames(tag: &mut Tag) {
    let _ = tag.remove("USLT");
    let _ = tag.remove("SYLT");
}
