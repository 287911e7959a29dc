//! config.rs
//! Runtime settings.
//!
//! Sources, lowest to highest priority:
//! - built-in defaults
//! - a JSON settings file (optional; unknown keys are rejected)
//! - `MUSYNC_MUSIC_ROOT` environment variable
//! - CLI flags (applied by `main.rs`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LoggingConfig;

pub const MUSIC_ROOT_ENV: &str = "MUSYNC_MUSIC_ROOT";

const DEFAULT_MUSIC_ROOT: &str = "/music";
const DEFAULT_DOWNLOAD_THREADS: usize = 8;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What to do with one lyrics target (the `.lrc` file or the embedded frames).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Overwrite with the reconciled lyrics.
    #[default]
    Write,
    /// Do not touch.
    Leave,
    /// Remove it.
    Delete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LyricsOptions {
    pub lrc: WriteMode,
    pub embed: WriteMode,
    /// Keep leading `作词 : ...` style credit lines.
    pub keep_credits: bool,
    /// With no lyrics anywhere, strip embedded USLT/SYLT frames.
    pub remove_embedded_when_missing: bool,
}

/// ID3 version used when saving tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagVersion {
    V23,
    #[default]
    V24,
}

impl From<TagVersion> for id3::Version {
    fn from(v: TagVersion) -> Self {
        match v {
            TagVersion::V23 => id3::Version::Id3v23,
            TagVersion::V24 => id3::Version::Id3v24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Library root processed when no roots are given.
    pub music_root: PathBuf,
    /// Worker count for the download pipeline.
    pub download_threads: usize,
    pub tag_version: TagVersion,
    pub lyrics: LyricsOptions,
    pub log: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_root: PathBuf::from(DEFAULT_MUSIC_ROOT),
            download_threads: DEFAULT_DOWNLOAD_THREADS,
            tag_version: TagVersion::default(),
            lyrics: LyricsOptions::default(),
            log: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Defaults, overlaid with `path` (if given), overlaid with the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(root) = std::env::var_os(MUSIC_ROOT_ENV) {
            settings.music_root = PathBuf::from(root);
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.download_threads == 0 {
            return Err(ConfigError::Invalid(
                "download_threads must be at least 1".to_string(),
            ));
        }
        if self.music_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("music_root is empty".to_string()));
        }
        Ok(())
    }
}
