//! Colour and pixel primitives.
//!
//! Cards are composed on a plain `image::RgbaImage`. Layers (glow, particles,
//! textures) are drawn onto their own transparent canvas first and then
//! composited over the base, so the helpers here only need to cover colour
//! math and per-pixel blending.

use image::{Pixel, Rgba, RgbaImage};

/// Opaque RGB colour. Alpha is chosen at the point of use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn rgba(&self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }

    #[inline]
    pub const fn opaque(&self) -> Rgba<u8> {
        self.rgba(255)
    }

    /// Linear interpolation towards `other`, truncating each channel.
    pub fn lerp(&self, other: Color, t: f32) -> Color {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl From<Rgba<u8>> for Color {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, _] = px.0;
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// Canvas filled with a single opaque colour.
pub fn solid(width: u32, height: u32, color: Color) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color.opaque())
}

/// Alpha-blend `color` onto the pixel at (x, y), scaled by `coverage` (0..=1).
///
/// Out-of-bounds coordinates are ignored.
#[inline]
pub fn blend_pixel(image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    let alpha = (color.0[3] as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
    if alpha == 0 {
        return;
    }
    let src = Rgba([color.0[0], color.0[1], color.0[2], alpha]);
    let dst = image.get_pixel_mut(x as u32, y as u32);
    if alpha == u8::MAX {
        *dst = src;
    } else {
        dst.blend(&src);
    }
}

/// Composite `layer` over `base` (both must share dimensions).
pub fn composite(base: &mut RgbaImage, layer: &RgbaImage) {
    image::imageops::overlay(base, layer, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints() {
        let a = Color::new(26, 32, 44);
        let b = Color::new(255, 215, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::new(140, 123, 22));
    }

    #[test]
    fn blend_respects_coverage_and_bounds() {
        let mut img = solid(2, 2, Color::BLACK);
        blend_pixel(&mut img, 0, 0, Color::WHITE.opaque(), 1.0);
        blend_pixel(&mut img, 1, 0, Color::WHITE.opaque(), 0.0);
        blend_pixel(&mut img, 5, 5, Color::WHITE.opaque(), 1.0);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn composite_skips_transparent_layer() {
        let mut base = solid(3, 3, Color::new(10, 20, 30));
        let mut layer = RgbaImage::new(3, 3);
        layer.put_pixel(1, 1, Color::WHITE.opaque());
        composite(&mut base, &layer);
        assert_eq!(Color::from(*base.get_pixel(0, 0)), Color::new(10, 20, 30));
        assert_eq!(Color::from(*base.get_pixel(1, 1)), Color::WHITE);
    }
}
