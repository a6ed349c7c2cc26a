//! `bitmap` subcommand — light keys from a PNG.

use std::path::Path;

use image::imageops::{self, FilterType};
use logiled_lib::led::{BITMAP_HEIGHT, BITMAP_WIDTH, LightingBitmap};

use super::{Config, LogiLedError, Result, led, open_session};

/// Decode `path` into a lighting bitmap, optionally scaled to the key grid.
fn load_bitmap(path: &Path, fit: bool) -> Result<LightingBitmap> {
    let img = image::open(path)
        .map_err(|e| LogiLedError::Bitmap(format!("{}: {e}", path.display())))?
        .to_rgba8();
    let img = if fit {
        imageops::resize(
            &img,
            BITMAP_WIDTH as u32,
            BITMAP_HEIGHT as u32,
            FilterType::Triangle,
        )
    } else {
        img
    };
    let (w, h) = img.dimensions();
    LightingBitmap::from_rgba(w as usize, h as usize, img.into_raw())
}

pub(super) fn cmd_bitmap(config: &Config, path: &Path, fit: bool) -> Result<()> {
    let bitmap = load_bitmap(path, fit)?;
    if !bitmap.is_device_sized() {
        return Err(LogiLedError::Bitmap(format!(
            "{} is {}x{}, expected {BITMAP_WIDTH}x{BITMAP_HEIGHT} (use --fit to resize)",
            path.display(),
            bitmap.width(),
            bitmap.height()
        )));
    }

    let session = open_session(config)?;
    let excluded = config.excluded_keys();
    if !excluded.is_empty() {
        led::exclude_keys_from_bitmap(session.device(), &excluded);
    }
    led::set_lighting_from_bitmap(session.device(), &bitmap);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(dir: &Path, w: u32, h: u32) -> std::path::PathBuf {
        let path = dir.join("keys.png");
        RgbaImage::from_pixel(w, h, Rgba([0xFF, 0x00, 0x00, 0xFF]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn load_bitmap_keeps_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), 21, 6);
        let bmp = load_bitmap(&path, false).unwrap();
        assert!(bmp.is_device_sized());
        assert_eq!(&bmp.to_bgra()[..4], &[0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn load_bitmap_fit_resizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), 42, 12);
        assert!(!load_bitmap(&path, false).unwrap().is_device_sized());
        assert!(load_bitmap(&path, true).unwrap().is_device_sized());
    }

    #[test]
    fn wrong_size_without_fit_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), 8, 8);
        let err = cmd_bitmap(&Config::default(), &path, false).unwrap_err();
        assert!(err.to_string().contains("expected 21x6"));
    }
}
