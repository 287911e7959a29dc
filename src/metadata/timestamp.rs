//! metadata/timestamp.rs
//! LRC timestamps: milliseconds <-> `MM:SS.ff`.
//!
//! Encoding keeps centiseconds only. Anything finer is truncated, so
//! `decode(encode(x)) == x` holds exactly when `x` is a multiple of 10.

use std::num::ParseIntError;

/// Turn the three captured pieces of `[MM:SS.fff]` into milliseconds.
///
/// The fraction is right-padded to 3 digits before parsing:
/// - "4"   -> 400 ms
/// - "45"  -> 450 ms
/// - "456" -> 456 ms
pub fn decode(minutes: &str, seconds: &str, fraction: &str) -> Result<u32, ParseIntError> {
    let minutes: u32 = minutes.parse()?;
    let seconds: u32 = seconds.parse()?;
    let fraction: u32 = format!("{fraction:0<3}").parse()?;

    Ok(minutes * 60_000 + seconds * 1_000 + fraction)
}

/// Format milliseconds as `MM:SS.ff` (no brackets).
pub fn encode(ms: u32) -> String {
    let minutes = ms / 60_000;
    let rem = ms % 60_000;
    let seconds = rem / 1_000;
    let centis = (rem % 1_000) / 10;

    format!("{minutes:02}:{seconds:02}.{centis:02}")
}
