//! metadata/tags/sidecar.rs
//! `Tags` <-> the `.json` sidecar document.

use thiserror::Error;

use super::Tags;

#[derive(Error, Debug)]
pub enum SidecarError {
    /// Bad JSON, an unknown key, or a value of the wrong type.
    #[error("invalid tags document: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Pretty JSON, recognized fields only, `None` fields omitted, trailing newline.
pub fn to_json(tags: &Tags) -> Result<String, SidecarError> {
    let mut out = serde_json::to_string_pretty(tags)?;
    out.push('\n');
    Ok(out)
}

/// Parse a sidecar. Fails closed: a typo'd key is an error, not an empty field.
pub fn from_json(text: &str) -> Result<Tags, SidecarError> {
    Ok(serde_json::from_str(text)?)
}
