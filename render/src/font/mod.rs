//! Font resolution and text drawing.
//!
//! Cards need a CJK-capable outline font. We try an ordered list of
//! candidate files and take the first one that exists *and* parses. If none
//! does, text is drawn with a small built-in raster font instead of failing:
//! latin digits stay legible, CJK glyphs become boxes.

use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, FontVec, PxScale};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

mod builtin;

/// Where the active font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::Builtin => write!(f, "built-in raster font"),
        }
    }
}

/// Horizontal anchoring of a text run; the y coordinate is always the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    LeftTop,
    MiddleTop,
}

#[derive(Clone)]
enum Face {
    Outline(FontArc),
    Builtin,
}

#[derive(Clone)]
pub struct CardFont {
    face: Face,
    source: FontSource,
}

impl std::fmt::Debug for CardFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardFont").field("source", &self.source).finish()
    }
}

impl CardFont {
    /// Resolve the first usable candidate, falling back to the built-in font.
    ///
    /// Candidates that are missing are skipped quietly; candidates that exist
    /// but cannot be parsed are skipped with a warning.
    pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for candidate in candidates {
            let path = candidate.as_ref();
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "font candidate missing");
                continue;
            }
            match Self::from_file(path) {
                Ok(font) => {
                    tracing::info!(path = %path.display(), "using font");
                    return font;
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "font candidate unusable");
                }
            }
        }

        tracing::warn!("no CJK font found; falling back to the built-in raster font");
        Self::builtin()
    }

    /// Load an outline font. Collections (`.ttc`) use their first face.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read font {}", path.display()))?;
        let font = FontVec::try_from_vec_and_index(bytes, 0)
            .with_context(|| format!("parse font {}", path.display()))?;
        Ok(Self {
            face: Face::Outline(FontArc::new(font)),
            source: FontSource::File(path.to_path_buf()),
        })
    }

    pub fn builtin() -> Self {
        Self {
            face: Face::Builtin,
            source: FontSource::Builtin,
        }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    pub fn text_width(&self, size: f32, text: &str) -> u32 {
        match &self.face {
            Face::Outline(font) => imageproc::drawing::text_size(PxScale::from(size), font, text).0,
            Face::Builtin => builtin::text_width(size, text),
        }
    }

    pub fn line_height(&self, size: f32) -> u32 {
        match &self.face {
            Face::Outline(font) => imageproc::drawing::text_size(PxScale::from(size), font, "国").1,
            Face::Builtin => builtin::line_height(size),
        }
    }

    /// Draw `text` with its top edge at `y`, anchored at `x` per `anchor`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(&self, image: &mut RgbaImage, x: i32, y: i32, anchor: Anchor, size: f32, color: Rgba<u8>, text: &str) {
        let x = match anchor {
            Anchor::LeftTop => x,
            Anchor::MiddleTop => x - (self.text_width(size, text) / 2) as i32,
        };
        match &self.face {
            Face::Outline(font) => imageproc::drawing::draw_text_mut(image, color, x, y, PxScale::from(size), font, text),
            Face::Builtin => builtin::draw(image, color, x, y, size, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_candidates_is_builtin() {
        let font = CardFont::resolve::<PathBuf>(&[]);
        assert!(font.is_builtin());
        assert_eq!(font.source(), &FontSource::Builtin);
    }

    #[test]
    fn resolve_skips_missing_and_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let garbage = dir.path().join("broken.ttf");
        std::fs::write(&garbage, b"definitely not a font").unwrap();

        let font = CardFont::resolve(&[dir.path().join("missing.otf"), garbage]);
        assert!(font.is_builtin());
    }

    fn fixture_font() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf")
    }

    #[test]
    fn first_parseable_candidate_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = dir.path().join("first.ttf");
        let second = dir.path().join("second.ttf");
        std::fs::copy(fixture_font(), &first).unwrap();
        std::fs::copy(fixture_font(), &second).unwrap();
        let garbage = dir.path().join("broken.ttf");
        std::fs::write(&garbage, b"definitely not a font").unwrap();

        let font = CardFont::resolve(&[dir.path().join("missing.otf"), garbage, first.clone(), second]);
        assert!(!font.is_builtin());
        assert_eq!(font.source(), &FontSource::File(first));
    }

    #[test]
    fn outline_font_draws_text() {
        let font = CardFont::from_file(fixture_font()).unwrap();
        assert!(font.text_width(16.0, "Ab") > 0);
        assert!(font.line_height(16.0) > 0);

        let mut img = crate::image::solid(80, 30, crate::Color::BLACK);
        font.draw(&mut img, 40, 4, Anchor::MiddleTop, 16.0, crate::Color::WHITE.opaque(), "Ab");
        let lit: Vec<u32> = img.enumerate_pixels().filter(|(_, _, p)| p.0[0] > 128).map(|(x, _, _)| x).collect();
        assert!(!lit.is_empty());
        // Centred on x=40: ink on both sides of the anchor.
        assert!(lit.iter().any(|&x| x < 40) && lit.iter().any(|&x| x > 40));
    }

    #[test]
    fn middle_anchor_centers_builtin_text() {
        let font = CardFont::builtin();
        let mut img = crate::image::solid(100, 20, crate::Color::BLACK);
        font.draw(&mut img, 50, 0, Anchor::MiddleTop, 8.0, crate::Color::WHITE.opaque(), "II");
        // Two 6px cells centered on x=50 start at x=44; 'I' strokes sit at column 2 of each cell.
        assert_eq!(crate::Color::from(*img.get_pixel(46, 3)), crate::Color::WHITE);
        assert_eq!(crate::Color::from(*img.get_pixel(52, 3)), crate::Color::WHITE);
        assert_eq!(crate::Color::from(*img.get_pixel(45, 3)), crate::Color::BLACK);
    }
}
