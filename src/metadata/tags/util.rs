//! metadata/tags/util.rs
//! Small helpers shared by tag reading/writing.

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const SPOTIFY_HOST: &str = "open.spotify.com";
pub(crate) const YOUTUBE_MUSIC_HOST: &str = "music.youtube.com";

/// Spotify / YouTube Music URLs embedded in free text (comments).
static SERVICE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:open\.spotify\.com|music\.youtube\.com)/\S+").expect("valid URL regex")
});

/// Which service a URL points at, judged by host substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    Spotify,
    YoutubeMusic,
}

pub(crate) fn classify_url(url: &str) -> Option<Service> {
    if url.contains(SPOTIFY_HOST) {
        Some(Service::Spotify)
    } else if url.contains(YOUTUBE_MUSIC_HOST) {
        Some(Service::YoutubeMusic)
    } else {
        None
    }
}

/// Split comment text into (service URLs found, remaining text trimmed).
pub(crate) fn split_comment_urls(text: &str) -> (Vec<&str>, String) {
    let urls = SERVICE_URL.find_iter(text).map(|m| m.as_str()).collect();
    let rest = SERVICE_URL.replace_all(text, "").trim().to_string();
    (urls, rest)
}
