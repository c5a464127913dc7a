use crate::Color;

/// Background theme: four gradient stops plus the glow/particle recipe that
/// gives each theme its mood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub key: &'static str,
    pub display_name: &'static str,
    pub stops: [Color; 4],
    pub glow: Glow,
    pub particles: Particles,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub intensity: f32,
    pub blur_radius: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particles {
    pub count: u32,
    pub color: Color,
    pub size: (u32, u32),
    pub opacity: (u8, u8),
}

const XIUXIAN_GLOW: Glow = Glow { color: Color::new(168, 85, 247), intensity: 0.2, blur_radius: 40 };
const XIUXIAN_PARTICLES: Particles = Particles { count: 40, color: Color::new(255, 215, 0), size: (1, 3), opacity: (100, 180) };

/// Every built-in theme; the first entry is the default.
pub static THEMES: [Theme; 7] = [
    Theme {
        key: "xiuxian",
        display_name: "修仙紫金",
        stops: [Color::new(26, 32, 44), Color::new(67, 56, 202), Color::new(139, 92, 246), Color::new(255, 215, 0)],
        glow: XIUXIAN_GLOW,
        particles: XIUXIAN_PARTICLES,
    },
    Theme {
        key: "alchemy",
        display_name: "炼丹火焰",
        stops: [Color::new(120, 40, 31), Color::new(220, 38, 38), Color::new(251, 146, 60), Color::new(255, 215, 0)],
        glow: Glow { color: Color::new(251, 146, 60), intensity: 0.3, blur_radius: 50 },
        particles: Particles { count: 30, color: Color::new(255, 100, 0), size: (2, 5), opacity: (120, 200) },
    },
    Theme {
        key: "combat",
        display_name: "战斗血红",
        stops: [Color::new(17, 24, 39), Color::new(127, 29, 29), Color::new(220, 38, 38), Color::new(255, 0, 0)],
        glow: Glow { color: Color::new(220, 38, 38), intensity: 0.25, blur_radius: 35 },
        particles: Particles { count: 60, color: Color::new(255, 0, 0), size: (1, 4), opacity: (100, 200) },
    },
    Theme {
        key: "sect",
        display_name: "宗门青云",
        stops: [Color::new(15, 23, 42), Color::new(30, 58, 138), Color::new(96, 165, 250), Color::new(255, 255, 255)],
        glow: XIUXIAN_GLOW,
        particles: XIUXIAN_PARTICLES,
    },
    Theme {
        key: "cultivation",
        display_name: "修炼紫气",
        stops: [Color::new(22, 30, 46), Color::new(49, 46, 129), Color::new(109, 40, 217), Color::new(168, 85, 247)],
        glow: XIUXIAN_GLOW,
        particles: XIUXIAN_PARTICLES,
    },
    Theme {
        key: "nature",
        display_name: "自然翠绿",
        stops: [Color::new(20, 83, 45), Color::new(22, 101, 52), Color::new(34, 197, 94), Color::new(134, 239, 172)],
        glow: Glow { color: Color::new(34, 197, 94), intensity: 0.2, blur_radius: 40 },
        particles: Particles { count: 35, color: Color::new(134, 239, 172), size: (1, 3), opacity: (80, 150) },
    },
    Theme {
        key: "treasure",
        display_name: "宝物金辉",
        stops: [Color::new(71, 85, 105), Color::new(168, 85, 247), Color::new(251, 191, 36), Color::new(255, 223, 0)],
        glow: Glow { color: Color::new(255, 215, 0), intensity: 0.35, blur_radius: 45 },
        particles: Particles { count: 50, color: Color::new(255, 223, 0), size: (2, 5), opacity: (150, 255) },
    },
];

impl Theme {
    pub const DEFAULT_KEY: &'static str = "xiuxian";

    pub fn get(key: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.key == key)
    }

    /// Look up a theme, using the xiuxian theme for unknown keys.
    pub fn get_or_default(key: &str) -> &'static Theme {
        Self::get(key).unwrap_or(&THEMES[0])
    }

    pub fn keys() -> impl Iterator<Item = &'static str> {
        THEMES.iter().map(|t| t.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_is_xiuxian() {
        assert_eq!(Theme::get_or_default("nope").key, Theme::DEFAULT_KEY);
        assert_eq!(Theme::get_or_default("combat").particles.count, 60);
        assert_eq!(Theme::keys().count(), 7);
    }
}
