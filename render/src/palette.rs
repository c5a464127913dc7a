use data::{Element, Quality};

use crate::Color;

/// The xiuxian colour scheme shared by every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Palette {
    pub bg_main: Color,
    pub bg_secondary: Color,
    pub bg_card: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_accent: Color,

    pub quality_common: Color,
    pub quality_uncommon: Color,
    pub quality_rare: Color,
    pub quality_epic: Color,
    pub quality_legendary: Color,
    pub quality_mythic: Color,

    pub element_gold: Color,
    pub element_wood: Color,
    pub element_water: Color,
    pub element_fire: Color,
    pub element_earth: Color,

    pub hp: Color,
    pub mp: Color,
    pub exp: Color,

    pub progress_bg: Color,
    pub progress_fill: Color,

    pub border_default: Color,
    pub border_highlight: Color,
}

impl Palette {
    pub const XIUXIAN: Self = Self {
        bg_main: Color::new(26, 32, 44),
        bg_secondary: Color::new(45, 55, 72),
        bg_card: Color::new(30, 41, 59),

        text_primary: Color::new(237, 242, 247),
        text_secondary: Color::new(160, 174, 192),
        text_accent: Color::new(255, 215, 0),

        quality_common: Color::new(156, 163, 175),
        quality_uncommon: Color::new(96, 165, 250),
        quality_rare: Color::new(168, 85, 247),
        quality_epic: Color::new(251, 191, 36),
        quality_legendary: Color::new(239, 68, 68),
        quality_mythic: Color::new(255, 0, 255),

        element_gold: Color::new(255, 215, 0),
        element_wood: Color::new(34, 197, 94),
        element_water: Color::new(59, 130, 246),
        element_fire: Color::new(239, 68, 68),
        element_earth: Color::new(161, 98, 7),

        hp: Color::new(239, 68, 68),
        mp: Color::new(59, 130, 246),
        exp: Color::new(251, 191, 36),

        progress_bg: Color::new(55, 65, 81),
        progress_fill: Color::new(139, 92, 246),

        border_default: Color::new(75, 85, 99),
        border_highlight: Color::new(168, 85, 247),
    };

    pub fn quality(&self, quality: Quality) -> Color {
        match quality {
            Quality::Common => self.quality_common,
            Quality::Uncommon => self.quality_uncommon,
            Quality::Rare => self.quality_rare,
            Quality::Epic => self.quality_epic,
            Quality::Legendary => self.quality_legendary,
            Quality::Mythic => self.quality_mythic,
        }
    }

    /// Colour for a grade name; unknown names get the common grey.
    pub fn quality_color(&self, name: &str) -> Color {
        self.quality(Quality::from_name(name))
    }

    /// Colour for an element name; unknown names get the primary text colour.
    pub fn element_color(&self, name: &str) -> Color {
        match Element::from_name(name) {
            Some(Element::Gold) => self.element_gold,
            Some(Element::Wood) => self.element_wood,
            Some(Element::Water) => self.element_water,
            Some(Element::Fire) => self.element_fire,
            Some(Element::Earth) => self.element_earth,
            None => self.text_primary,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::XIUXIAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_fall_back() {
        let p = Palette::default();
        assert_eq!(p.quality_color("仙品"), Color::new(251, 191, 36));
        assert_eq!(p.quality_color("???"), p.quality_common);
        assert_eq!(p.element_color("木"), Color::new(34, 197, 94));
        assert_eq!(p.element_color("雷"), p.text_primary);
    }
}
