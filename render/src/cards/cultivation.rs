use data::{CardKind, CultivationCard};

use super::{Card, Layout, PADDING};
use crate::{Color, Palette};

impl Card for CultivationCard {
    fn kind(&self) -> CardKind {
        CardKind::Cultivation
    }

    fn size(&self) -> (u32, u32) {
        (500, 300)
    }

    fn theme(&self) -> &'static str {
        "cultivation"
    }

    fn border(&self, palette: &Palette) -> (Color, u32) {
        (palette.border_default, 2)
    }

    fn draw(&self, l: &mut Layout) {
        let p = *l.palette;
        let mut y = PADDING + 20;

        l.centered(y, 28.0, p.text_accent, "修炼完成");
        y += 50;

        l.centered(y, 32.0, p.exp, &format!("+{} 修为", self.cultivation_gained));
        y += 50;

        l.centered(y, 18.0, p.text_secondary, &format!("当前修为：{}", self.total_cultivation));
        y += 40;

        if let Some(percent) = self.sect_bonus_percent() {
            l.centered(y, 16.0, p.text_primary, &format!("宗门加成：+{percent}%"));
            y += 35;
        }

        if self.can_breakthrough {
            l.centered(y, 20.0, p.quality_epic, &format!("可突破至 {}", self.next_realm));
            y += 30;
            l.centered(y, 16.0, p.text_secondary, &format!("需要修为：{}", self.required_cultivation));
        }
    }
}
