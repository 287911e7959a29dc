//! metadata/lyrics/serialize.rs
//! `Vec<LyricLine>` -> the two on-disk shapes.
//!
//! - `.lrc` keeps every line; timed ones get a `[MM:SS.ff]` prefix.
//! - ID3 gets USLT (all text, no timestamps) and, when anything is timed, SYLT
//!   (timed lines only). Untimed lines are absent from SYLT; USLT still has them.

use super::super::timestamp;
use super::super::types::LyricLine;

/// LRC text, newline-joined, exactly one trailing newline.
pub fn to_lrc(lines: &[LyricLine]) -> String {
    let mut out: String = lines
        .iter()
        .map(|line| match line.timestamp_ms {
            Some(ms) => format!("[{}] {}", timestamp::encode(ms), line.text),
            None => line.text.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Plain text for the unsynced (USLT) frame.
pub fn to_plain(lines: &[LyricLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `(ms, text)` pairs for the synced (SYLT) frame.
pub fn to_synced(lines: &[LyricLine]) -> Vec<(u32, String)> {
    lines
        .iter()
        .filter_map(|line| line.timestamp_ms.map(|ms| (ms, line.text.clone())))
        .collect()
}

pub fn has_timestamps(lines: &[LyricLine]) -> bool {
    lines.iter().any(|line| line.timestamp_ms.is_some())
}

#[cfg(test)]
mod tests {
    use super::super::parse::parse_lyrics;
    use super::*;

    #[test]
    fn lrc_output_has_single_trailing_newline() {
        let lines = vec![LyricLine::timed(1_500, "Hello"), LyricLine::timed(2_000, "World")];
        assert_eq!(to_lrc(&lines), "[00:01.50] Hello\n[00:02.00] World\n");
    }

    #[test]
    fn untimed_lines_render_bare() {
        let lines = vec![LyricLine::untimed("Line one"), LyricLine::untimed("Line two")];
        assert_eq!(to_lrc(&lines), "Line one\nLine two\n");
    }

    #[test]
    fn plain_drops_timestamps_and_synced_drops_untimed() {
        let lines = vec![
            LyricLine::untimed("intro"),
            LyricLine::timed(1_000, "a"),
            LyricLine::timed(2_000, "b"),
        ];
        assert_eq!(to_plain(&lines), "intro\na\nb");
        assert_eq!(
            to_synced(&lines),
            vec![(1_000, "a".to_string()), (2_000, "b".to_string())]
        );
        assert!(has_timestamps(&lines));
        assert!(!has_timestamps(&lines[..1]));
    }

    #[test]
    fn lrc_round_trips_centisecond_lines() {
        let lines = vec![
            LyricLine::untimed("Title card"),
            LyricLine::timed(0, "zero"),
            LyricLine::timed(1_230, "one"),
            LyricLine::untimed(""),
            LyricLine::timed(61_990, ""),
            LyricLine::timed(3_599_990, "late"),
            LyricLine::untimed("outro"),
        ];
        assert_eq!(parse_lyrics(&to_lrc(&lines)), lines);
    }

    #[test]
    fn sub_centisecond_precision_is_truncated() {
        let lines = vec![LyricLine::timed(1_509, "x")];
        assert_eq!(parse_lyrics(&to_lrc(&lines)), vec![LyricLine::timed(1_500, "x")]);
    }
}
