//! Skill icon loading.
//!
//! Reads an icon from disk and decodes it into an RGBA buffer ready for a GPU
//! texture. Failures are returned, never fatal: a skill without an icon still
//! orbits and the renderer draws a placeholder.
//!
//! Decodable formats are the `image` features enabled for the crate: PNG,
//! JPEG, GIF and WebP.

use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// Icons larger than this (either side) are scaled down.
pub const MAX_ICON_SIZE: u32 = 256;

/// Decoded icon (RGBA8, row-major).
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Resolve a skill's `logo` reference against an asset root.
pub fn resolve(root: &Path, logo: &str) -> PathBuf {
    let logo = logo.trim_start_matches('/');
    root.join(logo)
}

/// Load and decode one icon.
pub fn load_icon(path: &Path) -> Result<IconImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing {
            path: path.to_path_buf(),
        });
    }

    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (w, h, pixels) = if w > MAX_ICON_SIZE || h > MAX_ICON_SIZE {
        let ratio = MAX_ICON_SIZE as f32 / w.max(h) as f32;
        let new_w = ((w as f32 * ratio) as u32).max(1);
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized =
            image::imageops::resize(&rgba, new_w, new_h, image::imageops::FilterType::Triangle);
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    log::debug!("Loaded icon {} ({}x{})", path.display(), w, h);

    Ok(IconImage {
        width: w,
        height: h,
        rgba: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("skills-orbit-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        let p = resolve(Path::new("assets"), "/python.png");
        assert_eq!(p, Path::new("assets").join("python.png"));
    }

    #[test]
    fn test_default_catalog_icons_live_under_icons_dir() {
        let root = Path::new("assets");
        for skill in crate::config::default_skills() {
            let p = resolve(root, &skill.logo);
            assert!(p.starts_with(root.join("icons")), "{}", skill.name);
            assert_eq!(p.extension().and_then(|e| e.to_str()), Some("png"));
        }
    }

    #[test]
    fn test_missing_icon() {
        let err = load_icon(&temp_path("nope.png")).err().unwrap();
        assert!(matches!(err, AssetError::Missing { .. }));
    }

    #[test]
    fn test_undecodable_icon() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_icon(&path).err().unwrap();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn test_large_icon_is_capped() {
        let path = temp_path("wide.png");
        image::RgbaImage::from_pixel(512, 128, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
        let icon = load_icon(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!((icon.width, icon.height), (256, 64));
        assert_eq!(icon.rgba.len(), 256 * 64 * 4);
    }
}
