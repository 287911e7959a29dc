//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use id3::{Tag, Version};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use musync::metadata::container::{Id3Store, TagStore};

/// A single MPEG frame header plus padding. Enough for the `id3` crate.
pub const FAKE_MP3: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0, 0, 0, 0];

/// Write an untagged fake MP3 at `dir/name`.
pub fn bare_mp3(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, FAKE_MP3).unwrap();
    path
}

/// Write a fake MP3 carrying `tag`.
pub fn tagged_mp3(dir: &Path, name: &str, tag: &Tag) -> PathBuf {
    let path = bare_mp3(dir, name);
    tag.write_to_path(&path, Version::Id3v24).unwrap();
    path
}

pub fn read_tag(path: &Path) -> Tag {
    Tag::read_from_path(path).unwrap()
}

/// Fake MP3 whose tag header claims an ID3 version no reader supports,
/// followed by junk where the frames should be.
pub fn corrupt_tag_mp3(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = b"ID3\x09\x00\x00\x00\x00\x00\x10".to_vec();
    bytes.extend_from_slice(&[0xAB; 16]);
    bytes.extend_from_slice(FAKE_MP3);
    fs::write(&path, bytes).unwrap();
    path
}

pub fn png_bytes() -> Vec<u8> {
    solid_png(Rgb([20, 120, 220]))
}

/// 8x8 PNG of a single colour.
pub fn solid_png(color: Rgb<u8>) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Centre pixel of an encoded image.
pub fn centre_pixel(data: &[u8]) -> [u8; 3] {
    let img = image::load_from_memory(data).unwrap().to_rgb8();
    img.get_pixel(img.width() / 2, img.height() / 2).0
}

/// Per-channel closeness, loose enough for JPEG.
pub fn roughly(actual: [u8; 3], expected: [u8; 3]) -> bool {
    actual
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= 16)
}

/// Real ID3 store whose first `fail_saves` saves fail.
pub struct FlakyStore {
    inner: Id3Store,
    fail_saves: AtomicUsize,
    pub saves: Mutex<Vec<PathBuf>>,
}

impl FlakyStore {
    pub fn failing_first(n: usize) -> Self {
        Self {
            inner: Id3Store::default(),
            fail_saves: AtomicUsize::new(n),
            saves: Mutex::new(Vec::new()),
        }
    }
}

impl TagStore for FlakyStore {
    fn load(&self, path: &Path) -> Result<Option<Tag>, id3::Error> {
        self.inner.load(path)
    }

    fn save(&self, path: &Path, tag: &Tag) -> Result<(), id3::Error> {
        let remaining = self.fail_saves.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_saves.store(remaining - 1, Ordering::SeqCst);
            return Err(std::io::Error::other("disk full").into());
        }
        self.saves.lock().unwrap().push(path.to_path_buf());
        self.inner.save(path, tag)
    }
}
