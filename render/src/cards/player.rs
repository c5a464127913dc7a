use data::{CardKind, PlayerCard, realm_stage_name};

use super::{Card, Layout, PADDING};
use crate::{Color, Palette};

impl Card for PlayerCard {
    fn kind(&self) -> CardKind {
        CardKind::Player
    }

    fn size(&self) -> (u32, u32) {
        (600, 400)
    }

    fn theme(&self) -> &'static str {
        "xiuxian"
    }

    fn border(&self, palette: &Palette) -> (Color, u32) {
        (palette.border_highlight, 2)
    }

    fn draw(&self, l: &mut Layout) {
        let p = *l.palette;
        let left = PADDING + 20;
        let mut y = PADDING + 20;

        l.centered(y, 32.0, p.text_accent, &format!("【{}】", self.name));
        y += 50;

        let stage = realm_stage_name(self.realm_level);
        l.centered(y, 24.0, p.text_primary, &format!("{} · {}", self.realm, stage));
        y += 40;

        l.left(left, y, 16.0, p.text_secondary, &format!("修为进度：{}/{}", self.cultivation, self.max_cultivation));
        y += 25;

        let bar_width = (l.width() - PADDING * 2 - 40).max(0) as u32;
        l.progress(left, y, bar_width, 20, self.progress(), p.exp);
        y += 35;

        l.left(left, y, 18.0, p.hp, &format!("生命：{}/{}", self.hp, self.max_hp));
        y += 30;
        l.left(left, y, 18.0, p.mp, &format!("法力：{}/{}", self.mp, self.max_mp));
        y += 40;

        let right = l.center_x() + 20;
        l.left(left, y, 18.0, p.text_primary, &format!("攻击：{}", self.attack));
        l.left(right, y, 18.0, p.text_primary, &format!("防御：{}", self.defense));
        y += 40;

        let root_color = p.quality(self.spirit_root_quality());
        l.centered(
            y,
            18.0,
            root_color,
            &format!("灵根：{} ({})", self.spirit_root, self.spirit_root_quality),
        );
    }
}
