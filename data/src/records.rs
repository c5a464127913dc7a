//! Flat records the host hands over for each card kind.
//!
//! Every field may be omitted; missing fields take the same defaults the game
//! has always shown (an unnamed player is "未知", a fresh one sits at 凡人 etc).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{EquipmentKind, Quality};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerCard {
	pub name: String,
	pub realm: String,
	pub realm_level: i64,
	pub cultivation: i64,
	pub max_cultivation: i64,
	pub hp: i64,
	pub max_hp: i64,
	pub mp: i64,
	pub max_mp: i64,
	pub attack: i64,
	pub defense: i64,
	pub spirit_root: String,
	pub spirit_root_quality: String,
}

impl Default for PlayerCard {
	fn default() -> Self {
		Self {
			name: "未知".to_string(),
			realm: "凡人".to_string(),
			realm_level: 1,
			cultivation: 0,
			max_cultivation: 1000,
			hp: 100,
			max_hp: 100,
			mp: 100,
			max_mp: 100,
			attack: 0,
			defense: 0,
			spirit_root: "无".to_string(),
			spirit_root_quality: "凡品".to_string(),
		}
	}
}

impl PlayerCard {
	/// Fraction of the way to the next stage. Not clamped; drawing clamps.
	pub fn progress(&self) -> f32 {
		if self.max_cultivation > 0 {
			self.cultivation as f32 / self.max_cultivation as f32
		} else {
			0.0
		}
	}

	pub fn spirit_root_quality(&self) -> Quality {
		Quality::from_name(&self.spirit_root_quality)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CultivationCard {
	pub player_name: String,
	pub cultivation_gained: i64,
	pub total_cultivation: i64,
	pub can_breakthrough: bool,
	pub next_realm: String,
	pub required_cultivation: i64,
	pub sect_bonus_rate: f64,
}

impl Default for CultivationCard {
	fn default() -> Self {
		Self {
			player_name: String::new(),
			cultivation_gained: 0,
			total_cultivation: 0,
			can_breakthrough: false,
			next_realm: "未知境界".to_string(),
			required_cultivation: 0,
			sect_bonus_rate: 0.0,
		}
	}
}

impl CultivationCard {
	/// Sect bonus as a whole percent, `None` when there is no bonus.
	/// Halves round to even, so 12.5% shows as 12%.
	pub fn sect_bonus_percent(&self) -> Option<i64> {
		(self.sect_bonus_rate > 0.0).then(|| (self.sect_bonus_rate * 100.0).round_ties_even() as i64)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentCard {
	pub name: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub quality: String,
	pub level: i64,
	pub enhance_level: i64,
	/// Attribute key -> bonus, in the order given.
	pub attributes: Map<String, Value>,
}

impl Default for EquipmentCard {
	fn default() -> Self {
		Self {
			name: "未知装备".to_string(),
			kind: "未知".to_string(),
			quality: "凡品".to_string(),
			level: 1,
			enhance_level: 0,
			attributes: Map::new(),
		}
	}
}

impl EquipmentCard {
	pub fn display_name(&self) -> String {
		if self.enhance_level > 0 {
			format!("{} +{}", self.name, self.enhance_level)
		} else {
			self.name.clone()
		}
	}

	pub fn equipment_kind(&self) -> EquipmentKind {
		EquipmentKind::from_type(&self.kind)
	}

	pub fn quality(&self) -> Quality {
		Quality::from_name(&self.quality)
	}

	/// `(label, value)` pairs ready for display.
	pub fn attribute_lines(&self) -> Vec<(String, String)> {
		self.attributes
			.iter()
			.map(|(k, v)| (crate::attribute_label(k).to_string(), display_value(v)))
			.collect()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatCard {
	pub winner_name: String,
	pub loser_name: String,
	pub winner_hp: i64,
	pub winner_max_hp: i64,
	pub rounds: i64,
	pub rewards: Map<String, Value>,
}

impl Default for CombatCard {
	fn default() -> Self {
		Self {
			winner_name: "未知".to_string(),
			loser_name: "未知".to_string(),
			winner_hp: 100,
			winner_max_hp: 100,
			rounds: 0,
			rewards: Map::new(),
		}
	}
}

impl CombatCard {
	pub fn hp_percent(&self) -> f64 {
		if self.winner_max_hp > 0 {
			self.winner_hp as f64 / self.winner_max_hp as f64 * 100.0
		} else {
			0.0
		}
	}

	pub fn spirit_stone_reward(&self) -> Option<String> {
		self.rewards.get("spirit_stone").map(display_value)
	}

	pub fn exp_reward(&self) -> Option<String> {
		self.rewards.get("exp").map(display_value)
	}
}

fn display_value(v: &Value) -> String {
	match v {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_player_takes_defaults() {
		let p: PlayerCard = serde_json::from_str("{}").unwrap();
		assert_eq!(p, PlayerCard::default());
		assert_eq!(p.name, "未知");
		assert_eq!(p.max_cultivation, 1000);
		assert_eq!(p.spirit_root_quality(), Quality::Common);
	}

	#[test]
	fn progress_guards_zero_max() {
		let p = PlayerCard { cultivation: 500, max_cultivation: 0, ..Default::default() };
		assert_eq!(p.progress(), 0.0);
		let p = PlayerCard { cultivation: 850_000, max_cultivation: 1_000_000, ..Default::default() };
		assert!((p.progress() - 0.85).abs() < 1e-6);
	}

	#[test]
	fn sect_bonus_only_when_positive() {
		let c = CultivationCard { sect_bonus_rate: 0.2, ..Default::default() };
		assert_eq!(c.sect_bonus_percent(), Some(20));
		assert_eq!(CultivationCard::default().sect_bonus_percent(), None);
	}

	#[test]
	fn sect_bonus_halves_round_to_even() {
		let percent = |rate| CultivationCard { sect_bonus_rate: rate, ..Default::default() }.sect_bonus_percent();
		assert_eq!(percent(0.125), Some(12));
		assert_eq!(percent(0.375), Some(38));
		assert_eq!(percent(0.126), Some(13));
	}

	#[test]
	fn equipment_type_field_and_attribute_order() {
		let e: EquipmentCard = serde_json::from_str(
			r#"{"name":"紫霄仙剑","type":"weapon","enhance_level":15,
			"attributes":{"attack":2500,"crit_rate":35,"hp_bonus":1000}}"#,
		)
		.unwrap();
		assert_eq!(e.display_name(), "紫霄仙剑 +15");
		assert_eq!(e.equipment_kind(), EquipmentKind::Weapon);
		let lines = e.attribute_lines();
		assert_eq!(lines[0], ("攻击力".to_string(), "2500".to_string()));
		assert_eq!(lines[1].0, "暴击率");
		assert_eq!(lines[2].0, "生命值");
	}

	#[test]
	fn combat_percent_and_rewards() {
		let c: CombatCard = serde_json::from_str(
			r#"{"winner_hp":7500,"winner_max_hp":10000,"rewards":{"exp":300}}"#,
		)
		.unwrap();
		assert!((c.hp_percent() - 75.0).abs() < 1e-9);
		assert_eq!(c.exp_reward().as_deref(), Some("300"));
		assert_eq!(c.spirit_stone_reward(), None);

		let dead = CombatCard { winner_max_hp: 0, ..Default::default() };
		assert_eq!(dead.hp_percent(), 0.0);
	}
}
