//! Themed card backgrounds: gradients, a noise/texture overlay, a central glow
//! and scattered "spirit particles".
//!
//! All randomness comes from a seeded ChaCha RNG, so the same seed and inputs
//! always produce the same pixels. The renderer seeds it from the card's
//! content hash, which keeps cached and freshly rendered cards identical.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail, ensure};
use image::RgbaImage;
use imageproc::drawing::draw_filled_circle_mut;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::image::composite;
use crate::{Color, Particles, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Vertical,
    Horizontal,
    Diagonal,
    #[default]
    Radial,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Diagonal => "diagonal",
            Self::Radial => "radial",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "vertical" => Self::Vertical,
            "horizontal" => Self::Horizontal,
            "diagonal" => Self::Diagonal,
            "radial" => Self::Radial,
            other => bail!("unsupported gradient direction {other:?}"),
        })
    }
}

/// Which overlays to apply on top of the gradient.
///
/// `glow` and `particles` are multipliers on the theme's own recipe
/// (1.0 = as designed); `None` skips the effect.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Effects {
    pub texture: Option<f32>,
    pub texture_path: Option<PathBuf>,
    pub glow: Option<f32>,
    pub particles: Option<f32>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn full() -> Self {
        Self {
            texture: Some(0.15),
            texture_path: None,
            glow: Some(1.0),
            particles: Some(1.0),
        }
    }
}

/// Multi-stop gradient. Needs at least two stops.
pub fn gradient(width: u32, height: u32, stops: &[Color], direction: Direction, smooth: bool) -> Result<RgbaImage> {
    ensure!(stops.len() >= 2, "a gradient needs at least 2 colours, got {}", stops.len());

    let mut image = RgbaImage::new(width, height);
    let (w, h) = (width as f32, height as f32);
    let ratio = |i: u32, steps: u32| if steps > 1 { i as f32 / (steps - 1) as f32 } else { 0.0 };
    let center = ((width / 2) as f32, (height / 2) as f32);
    let max_radius = hypot(center.0.max(w - center.0), center.1.max(h - center.1));
    let diagonal = hypot(w, h);

    for (x, y, px) in image.enumerate_pixels_mut() {
        let progress = match direction {
            Direction::Vertical => ratio(y, height),
            Direction::Horizontal => ratio(x, width),
            Direction::Diagonal => hypot(x as f32, y as f32) / diagonal,
            Direction::Radial => (hypot((x as f32 - center.0).abs(), (y as f32 - center.1).abs()) / max_radius).min(1.0),
        };
        *px = sample(stops, progress, smooth).opaque();
    }

    Ok(image)
}

#[inline]
fn hypot(a: f32, b: f32) -> f32 {
    (a * a + b * b).sqrt()
}

fn sample(stops: &[Color], progress: f32, smooth: bool) -> Color {
    let segments = stops.len() - 1;
    let position = progress * segments as f32;
    let index = (position as usize).min(segments - 1);
    let mut local = position - index as f32;
    if smooth {
        local = smooth_step(local);
    }
    stops[index].lerp(stops[index + 1], local)
}

/// Ease-in-out on 0..=1.
pub fn smooth_step(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

pub struct BackgroundGenerator {
    rng: ChaCha8Rng,
}

impl BackgroundGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Gradient for `theme` plus whichever `effects` are enabled, in the
    /// order texture, glow, particles.
    pub fn themed(
        &mut self,
        width: u32,
        height: u32,
        theme: &Theme,
        direction: Direction,
        smooth: bool,
        effects: &Effects,
    ) -> Result<RgbaImage> {
        let mut image = gradient(width, height, &theme.stops, direction, smooth)?;

        if let Some(opacity) = effects.texture {
            self.add_texture(&mut image, effects.texture_path.as_deref(), opacity);
        }
        if let Some(scale) = effects.glow {
            let glow = theme.glow;
            add_glow(&mut image, glow.color, glow.intensity * scale, glow.blur_radius);
        }
        if let Some(scale) = effects.particles {
            let mut particles = theme.particles;
            particles.count = (particles.count as f32 * scale.max(0.0)).round() as u32;
            self.add_particles(&mut image, particles);
        }

        Ok(image)
    }

    /// Overlay a texture image (stretched to fit) or, without one, generated
    /// grey noise. The overlay's alpha is scaled by `opacity`.
    pub fn add_texture(&mut self, image: &mut RgbaImage, texture_path: Option<&Path>, opacity: f32) {
        let (width, height) = image.dimensions();
        let loaded = texture_path.and_then(|path| match ::image::open(path) {
            Ok(texture) => Some(::image::imageops::resize(
                &texture.to_rgba8(),
                width,
                height,
                ::image::imageops::FilterType::Lanczos3,
            )),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "texture unreadable; using noise");
                None
            }
        });
        let mut texture = loaded.unwrap_or_else(|| self.noise_texture(width, height, 20));

        let opacity = opacity.clamp(0.0, 1.0);
        for px in texture.pixels_mut() {
            px.0[3] = (px.0[3] as f32 * opacity) as u8;
        }
        composite(image, &texture);
    }

    fn noise_texture(&mut self, width: u32, height: u32, intensity: i32) -> RgbaImage {
        let mut texture = RgbaImage::from_pixel(width, height, Color::new(128, 128, 128).rgba(0));
        for y in (0..height).step_by(2) {
            for x in (0..width).step_by(2) {
                let gray = (128 + self.rng.gen_range(-intensity..=intensity)).clamp(0, 255) as u8;
                texture.put_pixel(x, y, Color::new(gray, gray, gray).rgba(50));
            }
        }
        texture
    }

    /// Scatter round particles; particles wider than 2px get a faint halo.
    pub fn add_particles(&mut self, image: &mut RgbaImage, particles: Particles) {
        let (width, height) = image.dimensions();
        let mut layer = RgbaImage::new(width, height);
        let (size_lo, size_hi) = (particles.size.0.min(particles.size.1), particles.size.0.max(particles.size.1));
        let (op_lo, op_hi) = (particles.opacity.0.min(particles.opacity.1), particles.opacity.0.max(particles.opacity.1));

        for _ in 0..particles.count {
            let x = self.rng.gen_range(0..=width as i32);
            let y = self.rng.gen_range(0..=height as i32);
            let size = self.rng.gen_range(size_lo..=size_hi) as i32;
            let opacity = self.rng.gen_range(op_lo..=op_hi);

            if size > 2 {
                draw_filled_circle_mut(&mut layer, (x, y), size + 2, particles.color.rgba(opacity / 3));
            }
            draw_filled_circle_mut(&mut layer, (x, y), size, particles.color.rgba(opacity));
        }

        composite(image, &layer);
    }
}

/// Soft glow in the middle of the image: concentric discs, blurred.
pub fn add_glow(image: &mut RgbaImage, color: Color, intensity: f32, blur_radius: u32) {
    if blur_radius == 0 || intensity <= 0.0 {
        return;
    }
    let (width, height) = image.dimensions();
    let mut layer = RgbaImage::new(width, height);
    let center = ((width / 2) as i32, (height / 2) as i32);

    let mut radius = blur_radius as i32;
    while radius > 0 {
        let alpha = (radius as f32 / blur_radius as f32 * 255.0 * intensity).min(255.0) as u8;
        draw_filled_circle_mut(&mut layer, center, radius, color.rgba(alpha));
        radius -= 2;
    }

    let sigma = (blur_radius / 2) as f32;
    if sigma > 0.0 {
        layer = imageproc::filter::gaussian_blur_f32(&layer, sigma);
    }
    composite(image, &layer);
}
