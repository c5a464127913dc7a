mod image;
pub use image::*;
mod palette;
pub use palette::*;
mod font;
pub use font::*;
pub mod draw;
mod theme;
pub use theme::*;
mod background;
pub use background::*;

pub mod cards;

use anyhow::Result;
use data::CardData;
use tracing::debug;

use crate::cards::{Layout, PADDING, PANEL_RADIUS};
use crate::draw::{Rect, Stroke, rounded_rect};

/// Alpha of the card panel when it sits on top of a generated background.
pub const PANEL_ALPHA: u8 = 220;

/// What goes underneath the card panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// Flat `bg_main` fill, panel fully opaque.
    Solid,
    /// `theme: None` uses the card's own theme.
    Themed {
        theme: Option<String>,
        direction: Direction,
        smooth: bool,
        effects: Effects,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub background: Background,
    pub anti_alias: bool,
    /// Seeds the background noise and particles.
    pub seed: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Background::Solid,
            anti_alias: true,
            seed: 0,
        }
    }
}

/// Draws cards with one resolved font and palette.
#[derive(Debug, Clone)]
pub struct Renderer {
    font: CardFont,
    palette: Palette,
}

impl Renderer {
    pub fn new(font: CardFont) -> Self {
        Self {
            font,
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn font(&self) -> &CardFont {
        &self.font
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn render(&self, data: &CardData, options: &RenderOptions) -> Result<::image::RgbaImage> {
        let card = cards::as_card(data);
        let (width, height) = card.size();

        let (mut canvas, panel_alpha) = match &options.background {
            Background::Solid => (solid(width, height, self.palette.bg_main), 255),
            Background::Themed { theme, direction, smooth, effects } => {
                let theme = Theme::get_or_default(theme.as_deref().unwrap_or(card.theme()));
                let canvas = BackgroundGenerator::new(options.seed)
                    .themed(width, height, theme, *direction, *smooth, effects)?;
                (canvas, PANEL_ALPHA)
            }
        };

        let (border, border_width) = card.border(&self.palette);
        rounded_rect(
            &mut canvas,
            Rect::new(PADDING, PADDING, width as i32 - PADDING, height as i32 - PADDING),
            PANEL_RADIUS,
            Some(self.palette.bg_card.rgba(panel_alpha)),
            Some(Stroke { color: border.opaque(), width: border_width }),
            options.anti_alias,
        );

        let mut layout = Layout {
            image: &mut canvas,
            font: &self.font,
            palette: &self.palette,
            anti_alias: options.anti_alias,
        };
        card.draw(&mut layout);

        debug!(kind = %card.kind(), width, height, font = %self.font.source(), "rendered card");
        Ok(canvas)
    }
}
