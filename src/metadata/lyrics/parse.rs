//! metadata/lyrics/parse.rs
//! Text -> `Vec<LyricLine>`, plus the credit-stripping cleanup pass.

use once_cell::sync::Lazy;
use regex::Regex;

use super::super::timestamp;
use super::super::types::LyricLine;

/// The bracketed head of an LRC line, *without* its closing `]`.
/// 2-digit minutes, 2-digit seconds, 2- or 3-digit fraction.
static LRC_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(\d{2}):(\d{2})\.(\d{2,3})$").expect("valid LRC regex"));

/// Parse lyrics text (LRC or plain) into lines.
///
/// - `[MM:SS.ff] text` -> timed line, leading spaces of `text` dropped
/// - anything else     -> untimed line, trimmed
///
/// Never fails: malformed brackets just become plain text.
pub fn parse_lyrics(text: &str) -> Vec<LyricLine> {
    text.lines()
        .map(str::trim_end)
        .map(|line| parse_timed(line).unwrap_or_else(|| LyricLine::untimed(line.trim())))
        .collect()
}

fn parse_timed(line: &str) -> Option<LyricLine> {
    if !line.starts_with('[') {
        return None;
    }
    let (head, rest) = line.split_once(']')?;
    let caps = LRC_HEAD.captures(head)?;
    let ms = timestamp::decode(&caps[1], &caps[2], &caps[3]).ok()?;

    Some(LyricLine::timed(ms, rest.trim_start()))
}

/// Trim every line and drop the leading block of credit lines.
///
/// A credit line is one whose trimmed text contains `" : "`
/// (e.g. `作词 : Someone`). Only the *leading* contiguous block counts:
/// once a non-credit line shows up, everything after it is kept as-is.
pub fn clean_lyrics(lines: Vec<LyricLine>) -> Vec<LyricLine> {
    let mut skipping_credits = true;

    trim_lyrics(lines)
        .into_iter()
        .filter(|line| {
            if skipping_credits && line.text.contains(" : ") {
                return false;
            }
            skipping_credits = false;
            true
        })
        .collect()
}

/// Only the trimming half of [`clean_lyrics`]; credits are kept.
pub fn trim_lyrics(lines: Vec<LyricLine>) -> Vec<LyricLine> {
    lines
        .into_iter()
        .map(|line| LyricLine {
            text: line.text.trim().to_string(),
            ..line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[LyricLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn parses_timed_and_plain_lines() {
        let lines = parse_lyrics("[00:01.50] Hello\n[00:02.00] World");
        assert_eq!(
            lines,
            vec![LyricLine::timed(1_500, "Hello"), LyricLine::timed(2_000, "World")]
        );
    }

    #[test]
    fn three_digit_fraction_and_no_space() {
        let lines = parse_lyrics("[01:02.345]Text");
        assert_eq!(lines, vec![LyricLine::timed(62_345, "Text")]);
    }

    #[test]
    fn malformed_brackets_fall_through() {
        let lines = parse_lyrics(
            "[ar:Someone]\n[00:01.5] short fraction\n[0:01.50] one digit\n[00:01.50x] junk\n[unterminated",
        );
        assert!(lines.iter().all(|l| l.timestamp_ms.is_none()));
        assert_eq!(
            texts(&lines),
            vec![
                "[ar:Someone]",
                "[00:01.5] short fraction",
                "[0:01.50] one digit",
                "[00:01.50x] junk",
                "[unterminated",
            ]
        );
    }

    #[test]
    fn only_the_first_timestamp_is_taken() {
        let lines = parse_lyrics("[00:01.00][00:05.00] repeated");
        assert_eq!(lines, vec![LyricLine::timed(1_000, "[00:05.00] repeated")]);
    }

    #[test]
    fn plain_lines_are_trimmed_and_blank_lines_kept() {
        let lines = parse_lyrics("  first  \r\n\n\tsecond");
        assert_eq!(
            lines,
            vec![
                LyricLine::untimed("first"),
                LyricLine::untimed(""),
                LyricLine::untimed("second"),
            ]
        );
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(parse_lyrics("").is_empty());
    }

    #[test]
    fn credits_only_stripped_from_the_leading_block() {
        let lines = vec![
            LyricLine::untimed("A : B"),
            LyricLine::untimed("verse"),
            LyricLine::untimed("C : D"),
        ];
        assert_eq!(texts(&clean_lyrics(lines)), vec!["verse", "C : D"]);
    }

    #[test]
    fn timed_credit_lines_are_stripped_too() {
        let lines = parse_lyrics("[00:00.00] 作词 : X\n[00:00.50] 作曲 : Y\n[00:01.00] Line one");
        assert_eq!(clean_lyrics(lines), vec![LyricLine::timed(1_000, "Line one")]);
    }

    #[test]
    fn colon_without_spaces_is_not_a_credit() {
        let lines = vec![LyricLine::untimed("Note: hello"), LyricLine::untimed("x : y")];
        assert_eq!(texts(&clean_lyrics(lines)), vec!["Note: hello", "x : y"]);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let lines = vec![
            LyricLine::untimed("  作词 : X "),
            LyricLine::timed(10, " 作曲 : Y"),
            LyricLine::timed(20, "  first  "),
            LyricLine::untimed("mid : credit-like"),
            LyricLine::untimed(""),
        ];
        let once = clean_lyrics(lines);
        let twice = clean_lyrics(once.clone());
        assert_eq!(once, twice);
        assert_eq!(texts(&once), vec!["first", "mid : credit-like", ""]);
    }

    #[test]
    fn everything_credit_like_cleans_to_nothing() {
        let lines = vec![LyricLine::untimed("a : b"), LyricLine::untimed("c : d")];
        assert!(clean_lyrics(lines).is_empty());
    }

    #[test]
    fn trim_keeps_credits() {
        let lines = vec![LyricLine::untimed(" 作词 : X "), LyricLine::untimed("verse")];
        assert_eq!(texts(&trim_lyrics(lines)), vec!["作词 : X", "verse"]);
    }
}
