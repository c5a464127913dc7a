//! Shape primitives used by the card layouts.

use image::{Rgba, RgbaImage};

use crate::Color;
use crate::image::blend_pixel;

/// Pixel box with inclusive corners (`x2`/`y2` are the last covered pixel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1 + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: Rgba<u8>,
    pub width: u32,
}

/// Fill and/or outline a rounded rectangle.
///
/// The radius is clamped to half the shorter side. With `anti_alias` the
/// edge pixels get fractional coverage, otherwise coverage is all-or-nothing.
pub fn rounded_rect(
    image: &mut RgbaImage,
    rect: Rect,
    radius: u32,
    fill: Option<Rgba<u8>>,
    outline: Option<Stroke>,
    anti_alias: bool,
) {
    if rect.width() <= 0 || rect.height() <= 0 {
        return;
    }
    let outline = outline.filter(|s| s.width > 0);
    if fill.is_none() && outline.is_none() {
        return;
    }

    let hx = rect.width() as f32 / 2.0;
    let hy = rect.height() as f32 / 2.0;
    let cx = rect.x1 as f32 + hx;
    let cy = rect.y1 as f32 + hy;
    let r = (radius as f32).min(hx).min(hy);

    let y_range = rect.y1.max(0)..=rect.y2.min(image.height() as i32 - 1);
    for y in y_range {
        for x in rect.x1.max(0)..=rect.x2.min(image.width() as i32 - 1) {
            let d = rounded_box_distance(x as f32 + 0.5 - cx, y as f32 + 0.5 - cy, hx, hy, r);
            let outer = coverage(d, anti_alias);
            if outer <= 0.0 {
                continue;
            }
            match outline {
                Some(stroke) => {
                    let inner = coverage(d + stroke.width as f32, anti_alias);
                    if let Some(fill) = fill {
                        blend_pixel(image, x, y, fill, inner);
                    }
                    blend_pixel(image, x, y, stroke.color, (outer - inner).max(0.0));
                }
                None => {
                    if let Some(fill) = fill {
                        blend_pixel(image, x, y, fill, outer);
                    }
                }
            }
        }
    }
}

/// Signed distance from a point (relative to the box centre) to a rounded box.
fn rounded_box_distance(px: f32, py: f32, hx: f32, hy: f32, r: f32) -> f32 {
    let qx = px.abs() - (hx - r);
    let qy = py.abs() - (hy - r);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

#[inline]
fn coverage(distance: f32, anti_alias: bool) -> f32 {
    if anti_alias {
        (0.5 - distance).clamp(0.0, 1.0)
    } else if distance < 0.0 {
        1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarStyle {
    pub background: Color,
    pub fill: Color,
    pub border: Color,
    pub radius: u32,
}

/// Horizontal progress bar. `progress` is clamped to 0..=1; at 0 only the
/// background is drawn.
#[allow(clippy::too_many_arguments)]
pub fn progress_bar(
    image: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    progress: f32,
    style: BarStyle,
    anti_alias: bool,
) {
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };

    rounded_rect(
        image,
        Rect::new(x, y, x + width as i32, y + height as i32),
        style.radius,
        Some(style.background.opaque()),
        Some(Stroke { color: style.border.opaque(), width: 1 }),
        anti_alias,
    );

    if progress > 0.0 {
        let fill_width = (width as f32 * progress) as i32;
        rounded_rect(
            image,
            Rect::new(x, y, x + fill_width, y + height as i32),
            style.radius,
            Some(style.fill.opaque()),
            None,
            anti_alias,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::solid;

    const RED: Color = Color::new(200, 0, 0);
    const BLUE: Color = Color::new(0, 0, 200);

    #[test]
    fn rounded_corners_stay_clear() {
        let mut img = solid(40, 40, Color::BLACK);
        rounded_rect(&mut img, Rect::new(0, 0, 39, 39), 10, Some(RED.opaque()), None, false);
        assert_eq!(Color::from(*img.get_pixel(20, 20)), RED);
        assert_eq!(Color::from(*img.get_pixel(0, 20)), RED);
        assert_eq!(Color::from(*img.get_pixel(0, 0)), Color::BLACK);
        assert_eq!(Color::from(*img.get_pixel(39, 39)), Color::BLACK);
    }

    #[test]
    fn outline_is_a_band() {
        let mut img = solid(40, 40, Color::BLACK);
        rounded_rect(
            &mut img,
            Rect::new(0, 0, 39, 39),
            5,
            Some(RED.opaque()),
            Some(Stroke { color: BLUE.opaque(), width: 3 }),
            false,
        );
        assert_eq!(Color::from(*img.get_pixel(20, 0)), BLUE);
        assert_eq!(Color::from(*img.get_pixel(20, 2)), BLUE);
        assert_eq!(Color::from(*img.get_pixel(20, 3)), RED);
        assert_eq!(Color::from(*img.get_pixel(20, 20)), RED);
    }

    #[test]
    fn clipped_rect_does_not_panic() {
        let mut img = solid(10, 10, Color::BLACK);
        rounded_rect(&mut img, Rect::new(-5, -5, 20, 20), 3, Some(RED.opaque()), None, true);
        assert_eq!(Color::from(*img.get_pixel(5, 5)), RED);
        rounded_rect(&mut img, Rect::new(5, 5, 4, 4), 3, Some(BLUE.opaque()), None, true);
    }

    #[test]
    fn progress_fill_width_follows_ratio() {
        let style = BarStyle { background: Color::BLACK, fill: RED, border: Color::BLACK, radius: 0 };
        let mut img = solid(120, 20, Color::WHITE);
        progress_bar(&mut img, 0, 0, 100, 10, 0.5, style, false);
        assert_eq!(Color::from(*img.get_pixel(25, 5)), RED);
        assert_eq!(Color::from(*img.get_pixel(49, 5)), RED);
        assert_eq!(Color::from(*img.get_pixel(75, 5)), Color::BLACK);

        let mut img = solid(120, 20, Color::WHITE);
        progress_bar(&mut img, 0, 0, 100, 10, 3.0, style, false);
        assert_eq!(Color::from(*img.get_pixel(95, 5)), RED);

        let mut img = solid(120, 20, Color::WHITE);
        progress_bar(&mut img, 0, 0, 100, 10, 0.0, style, false);
        assert_eq!(Color::from(*img.get_pixel(25, 5)), Color::BLACK);
    }
}
