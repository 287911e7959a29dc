//! metadata/art.rs
//! Album art reconciler: `.jpg` sidecar <-> one embedded APIC frame.
//!
//! - Source: `.jpg` if it exists, else the first embedded picture.
//! - Whatever we found is normalized to JPEG (already-JPEG bytes pass through).
//! - Both targets get the same bytes; the tag keeps exactly one picture.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use id3::frame::{Content, Picture, PictureType};
use id3::{Tag, TagLike};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use tracing::{debug, info, warn};

use crate::error::SyncError;

use super::container::{TagStore, load_for_read, load_for_write};
use super::library::{display_name, jpg_path};
use super::types::{Outcome, StepResult};

pub const JPEG_QUALITY: u8 = 95;
const JPEG_MIME: &str = "image/jpeg";
const COVER_DESCRIPTION: &str = "Cover";

/// Bytes of the first embedded picture (APIC, or PIC in old v2.2 tags).
pub fn read_embedded_art(tag: &Tag) -> Option<Vec<u8>> {
    tag.frames()
        .filter(|f| f.id() == "APIC" || f.id() == "PIC")
        .find_map(|f| match f.content() {
            Content::Picture(p) => Some(p.data.clone()),
            _ => None,
        })
}

/// Replace every embedded picture with a single front cover.
pub fn embed_art(tag: &mut Tag, jpeg: Vec<u8>) {
    tag.remove_all_pictures();
    let _ = tag.add_frame(Picture {
        mime_type: JPEG_MIME.to_string(),
        picture_type: PictureType::CoverFront,
        description: COVER_DESCRIPTION.to_string(),
        data: jpeg,
    });
}

/// Convert any image the codec understands into JPEG.
///
/// - JPEG in -> same bytes out
/// - otherwise decode, flatten onto white, re-encode at `JPEG_QUALITY`
pub fn normalize_to_jpeg(data: &[u8]) -> Result<Vec<u8>, ImageError> {
    if image::guess_format(data)? == ImageFormat::Jpeg {
        return Ok(data.to_vec());
    }

    let rgb = flatten_on_white(&image::load_from_memory(data)?.to_rgba8());

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).encode_image(&rgb)?;
    Ok(out.into_inner())
}

/// Composite over an opaque white background. Opaque images come out unchanged.
fn flatten_on_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let blend = |c: u8| ((c as u16 * a as u16 + 255 * (255 - a as u16) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Reconcile album art for one MP3.
pub fn process_album_art(store: &dyn TagStore, path: &Path) -> StepResult {
    let jpg = jpg_path(path);

    let raw = if jpg.exists() {
        Some(fs::read(&jpg).map_err(|e| SyncError::malformed(&jpg, e))?)
    } else {
        load_for_read(store, path).as_ref().and_then(read_embedded_art)
    };

    let Some(raw) = raw else {
        info!("Could not find any album art for {}, skipping", display_name(path));
        return Ok(Outcome::NotFound);
    };

    let jpeg = match normalize_to_jpeg(&raw) {
        Ok(jpeg) => jpeg,
        Err(e) => {
            warn!("Unusable album art for {}: {e}", display_name(path));
            return Ok(Outcome::NotFound);
        }
    };

    fs::write(&jpg, &jpeg).map_err(|e| SyncError::sidecar_write(&jpg, e))?;

    let mut tag = load_for_write(store, path);
    embed_art(&mut tag, jpeg);
    store
        .save(path, &tag)
        .map_err(|e| SyncError::container_write(path, e))?;

    debug!("Embedded album art into {}", path.display());
    Ok(Outcome::Synced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn png_with_alpha() -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 128])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn png_is_converted_to_jpeg() {
        let jpeg = normalize_to_jpeg(&png_with_alpha()).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }

    #[test]
    fn transparent_pixels_become_white() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 0]));
        img.put_pixel(0, 0, Rgba([0, 0, 255, 255]));

        let flat = flatten_on_white(&img);
        assert_eq!(flat.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(flat.get_pixel(3, 3), &Rgb([255, 255, 255]));
    }

    #[test]
    fn transparent_png_encodes_as_white_jpeg() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 0])));
        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageFormat::Png).unwrap();

        let jpeg = normalize_to_jpeg(png.get_ref()).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap().to_rgb8();
        let Rgb([r, g, b]) = *decoded.get_pixel(4, 4);
        assert!(r > 240 && g > 240 && b > 240, "got {r},{g},{b}");
    }

    #[test]
    fn half_transparent_pixels_blend_towards_white() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        assert_eq!(flatten_on_white(&img).get_pixel(0, 0), &Rgb([127, 127, 127]));
    }

    #[test]
    fn jpeg_passes_through_untouched() {
        let jpeg = normalize_to_jpeg(&png_with_alpha()).unwrap();
        assert_eq!(normalize_to_jpeg(&jpeg).unwrap(), jpeg);
    }

    #[test]
    fn garbage_is_a_codec_error() {
        assert!(normalize_to_jpeg(b"definitely not an image").is_err());
    }

    #[test]
    fn embed_keeps_a_single_picture() {
        let mut tag = Tag::new();
        for kind in [PictureType::CoverFront, PictureType::CoverBack] {
            tag.add_frame(Picture {
                mime_type: "image/png".to_string(),
                picture_type: kind,
                description: String::new(),
                data: vec![1, 2, 3],
            });
        }

        embed_art(&mut tag, vec![9, 9, 9]);

        let pictures: Vec<_> = tag.pictures().collect();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].mime_type, "image/jpeg");
        assert_eq!(pictures[0].picture_type, PictureType::CoverFront);
        assert_eq!(read_embedded_art(&tag), Some(vec![9, 9, 9]));
    }

    #[test]
    fn no_picture_reads_as_none() {
        assert_eq!(read_embedded_art(&Tag::new()), None);
    }
}
