use data::{CardKind, CombatCard};

use super::{Card, Layout, PADDING};
use crate::{Color, Palette};

impl Card for CombatCard {
    fn kind(&self) -> CardKind {
        CardKind::Combat
    }

    fn size(&self) -> (u32, u32) {
        (550, 400)
    }

    fn theme(&self) -> &'static str {
        "combat"
    }

    fn border(&self, palette: &Palette) -> (Color, u32) {
        (palette.quality_epic, 2)
    }

    fn draw(&self, l: &mut Layout) {
        let p = *l.palette;
        let mut y = PADDING + 20;

        l.centered(y, 32.0, p.text_accent, "战斗结果");
        y += 60;

        l.centered(y, 28.0, p.quality_epic, &format!("{} 获胜！", self.winner_name));
        y += 50;

        l.centered(y, 20.0, p.text_secondary, &format!("VS {}", self.loser_name));
        y += 40;

        l.centered(y, 16.0, p.text_secondary, &format!("战斗回合：{}", self.rounds));
        y += 35;

        l.centered(
            y,
            16.0,
            p.hp,
            &format!("剩余生命：{}/{} ({:.1}%)", self.winner_hp, self.winner_max_hp, self.hp_percent()),
        );
        y += 40;

        if self.rewards.is_empty() {
            return;
        }
        l.centered(y, 20.0, p.text_primary, "战斗奖励");
        y += 35;

        if let Some(stones) = self.spirit_stone_reward() {
            l.centered(y, 18.0, p.text_primary, &format!("灵石 +{stones}"));
            y += 30;
        }
        if let Some(exp) = self.exp_reward() {
            l.centered(y, 18.0, p.text_primary, &format!("经验 +{exp}"));
        }
    }
}
