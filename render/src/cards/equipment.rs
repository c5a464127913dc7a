use data::{CardKind, EquipmentCard};

use super::{Card, Layout, PADDING};
use crate::{Color, Palette};

impl Card for EquipmentCard {
    fn kind(&self) -> CardKind {
        CardKind::Equipment
    }

    fn size(&self) -> (u32, u32) {
        (450, 350)
    }

    fn theme(&self) -> &'static str {
        "treasure"
    }

    fn border(&self, palette: &Palette) -> (Color, u32) {
        (palette.quality(self.quality()), 3)
    }

    fn draw(&self, l: &mut Layout) {
        let p = *l.palette;
        let quality_color = p.quality(self.quality());
        let mut y = PADDING + 20;

        l.centered(y, 24.0, quality_color, &self.display_name());
        y += 40;

        let kind = self.equipment_kind();
        l.centered(y, 18.0, p.text_secondary, &format!("{} · {}", kind.label(), self.quality));
        y += 40;

        l.centered(y, 16.0, p.text_secondary, &format!("等级：{}", self.level));
        y += 35;

        let lines = self.attribute_lines();
        if lines.is_empty() {
            return;
        }
        l.left(PADDING + 20, y, 18.0, p.text_primary, "属性：");
        y += 30;
        for (label, value) in lines {
            l.left(PADDING + 40, y, 16.0, p.text_primary, &format!("{label}：+{value}"));
            y += 28;
        }
    }
}
