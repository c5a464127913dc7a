//! PNG encoding and file placement.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use data::CardKind;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::ImageQuality;

impl ImageQuality {
    pub fn compression(&self) -> CompressionType {
        match self {
            Self::Low => CompressionType::Fast,
            Self::Medium => CompressionType::Default,
            Self::High => CompressionType::Best,
        }
    }
}

pub fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

/// `{kind}_card_{identifier}_{unix_seconds}.png`.
///
/// The name only has second resolution: two cards for the same identifier
/// within one second share a name and the later write replaces the earlier.
/// Characters that are not safe in a file name are replaced with `_`.
pub fn card_filename(kind: CardKind, identifier: &str, unix_seconds: u64) -> String {
    format!("{kind}_card_{}_{unix_seconds}.png", file_safe(identifier))
}

/// `background_{theme}_{unix_seconds}.png`, for bare backgrounds.
pub fn background_filename(theme: &str, unix_seconds: u64) -> String {
    format!("background_{}_{unix_seconds}.png", file_safe(theme))
}

fn file_safe(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

pub fn png_bytes(image: &RgbaImage, quality: ImageQuality) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, quality.compression(), FilterType::Adaptive)
        .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgba8)
        .context("Encode PNG")?;
    Ok(buf)
}

/// Write `bytes` to `dir/name` through a temporary file, so readers never
/// see a half-written card.
pub fn write_atomic(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("Create output dir {}", dir.display()))?;
    let path = dir.join(name);
    let tmp = dir.join(format!(".{name}.tmp"));

    let file = File::create(&tmp).with_context(|| format!("Write temp {}", tmp.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).with_context(|| format!("Write temp {}", tmp.display()))?;
    writer.flush().context("Flush PNG")?;
    drop(writer);

    // Replace existing file (Windows-friendly).
    if std::fs::rename(&tmp, &path).is_err() {
        let _ = std::fs::remove_file(&path);
        std::fs::rename(&tmp, &path).with_context(|| format!("Persist {}", path.display()))?;
    }
    Ok(path)
}

pub fn save_png(image: &RgbaImage, dir: &Path, name: &str, quality: ImageQuality) -> Result<PathBuf> {
    let bytes = png_bytes(image, quality)?;
    let path = write_atomic(dir, name, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "saved card");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_template() {
        assert_eq!(card_filename(CardKind::Player, "10086", 1700000000), "player_card_10086_1700000000.png");
        assert_eq!(card_filename(CardKind::Combat, "a/b c", 5), "combat_card_a_b_c_5.png");
        assert_eq!(card_filename(CardKind::Equipment, "道友", 5), "equipment_card_道友_5.png");
        assert_eq!(background_filename("sect", 9), "background_sect_9.png");
    }

    #[test]
    fn same_second_same_name() {
        let a = card_filename(CardKind::Cultivation, "u1", 42);
        let b = card_filename(CardKind::Cultivation, "u1", 42);
        assert_eq!(a, b);
        assert_ne!(a, card_filename(CardKind::Cultivation, "u1", 43));
    }

    #[test]
    fn png_decodes_back() {
        let img = RgbaImage::from_pixel(8, 4, image::Rgba([1, 2, 3, 255]));
        for quality in [ImageQuality::Low, ImageQuality::Medium, ImageQuality::High] {
            let bytes = png_bytes(&img, quality).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
            assert_eq!(decoded, img);
        }
    }

    #[test]
    fn later_write_replaces_earlier() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = write_atomic(dir.path(), "x.png", b"one").unwrap();
        let second = write_atomic(dir.path(), "x.png", b"two").unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
