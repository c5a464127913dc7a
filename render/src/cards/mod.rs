//! Card layouts.
//!
//! Each record type knows its canvas size, border and how to lay out its
//! lines; the shared frame (background, panel) is drawn by
//! [`crate::Renderer`]. Coordinates are absolute pixels on the card canvas.

use data::{CardData, CardKind};
use image::RgbaImage;

use crate::draw::{BarStyle, progress_bar};
use crate::{Anchor, CardFont, Color, Palette};

mod combat;
mod cultivation;
mod equipment;
mod player;

/// Gap between the canvas edge and the panel.
pub const PADDING: i32 = 30;
/// Corner radius of the panel.
pub const PANEL_RADIUS: u32 = 15;

pub trait Card {
    fn kind(&self) -> CardKind;

    fn size(&self) -> (u32, u32);

    /// Background theme used when the caller does not pick one.
    fn theme(&self) -> &'static str;

    /// Panel border colour and width.
    fn border(&self, palette: &Palette) -> (Color, u32);

    fn draw(&self, layout: &mut Layout);
}

pub fn as_card(data: &CardData) -> &dyn Card {
    match data {
        CardData::Player(v) => v,
        CardData::Cultivation(v) => v,
        CardData::Equipment(v) => v,
        CardData::Combat(v) => v,
    }
}

/// Drawing context handed to [`Card::draw`].
pub struct Layout<'a> {
    pub image: &'a mut RgbaImage,
    pub font: &'a CardFont,
    pub palette: &'a Palette,
    pub anti_alias: bool,
}

impl Layout<'_> {
    pub fn width(&self) -> i32 {
        self.image.width() as i32
    }

    pub fn center_x(&self) -> i32 {
        self.width() / 2
    }

    /// Text horizontally centred on the card.
    pub fn centered(&mut self, y: i32, size: f32, color: Color, text: &str) {
        let x = self.center_x();
        self.font.draw(self.image, x, y, Anchor::MiddleTop, size, color.opaque(), text);
    }

    pub fn left(&mut self, x: i32, y: i32, size: f32, color: Color, text: &str) {
        self.font.draw(self.image, x, y, Anchor::LeftTop, size, color.opaque(), text);
    }

    pub fn progress(&mut self, x: i32, y: i32, width: u32, height: u32, progress: f32, fill: Color) {
        let style = BarStyle {
            background: self.palette.progress_bg,
            fill,
            border: self.palette.border_default,
            radius: 5,
        };
        progress_bar(self.image, x, y, width, height, progress, style, self.anti_alias);
    }
}
