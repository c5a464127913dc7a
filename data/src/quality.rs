/// Item / spirit root grade, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, serde::Deserialize, serde::Serialize)]
pub enum Quality {
	#[default]
	Common,
	Uncommon,
	Rare,
	Epic,
	Legendary,
	Mythic,
}

impl Quality {
	pub const ALL: [Self; 6] = [
		Self::Common,
		Self::Uncommon,
		Self::Rare,
		Self::Epic,
		Self::Legendary,
		Self::Mythic,
	];

	/// Parse the in-game grade name. Unknown grades count as common.
	pub fn from_name(name: &str) -> Self {
		match name.trim() {
			"灵品" => Self::Uncommon,
			"宝品" => Self::Rare,
			"仙品" => Self::Epic,
			"神品" => Self::Legendary,
			"道品" => Self::Mythic,
			_ => Self::Common,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::Common => "凡品",
			Self::Uncommon => "灵品",
			Self::Rare => "宝品",
			Self::Epic => "仙品",
			Self::Legendary => "神品",
			Self::Mythic => "道品",
		}
	}
}

/// The five elements used for spirit roots and techniques.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum Element {
	Gold,
	Wood,
	Water,
	Fire,
	Earth,
}

impl Element {
	pub fn from_name(name: &str) -> Option<Self> {
		match name.trim() {
			"金" => Some(Self::Gold),
			"木" => Some(Self::Wood),
			"水" => Some(Self::Water),
			"火" => Some(Self::Fire),
			"土" => Some(Self::Earth),
			_ => None,
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Self::Gold => "金",
			Self::Wood => "木",
			Self::Water => "水",
			Self::Fire => "火",
			Self::Earth => "土",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentKind {
	Weapon,
	Armor,
	Accessory,
	/// Anything the game adds later; shown verbatim.
	Other(String),
}

impl EquipmentKind {
	pub fn from_type(kind: &str) -> Self {
		match kind {
			"weapon" => Self::Weapon,
			"armor" => Self::Armor,
			"accessory" => Self::Accessory,
			other => Self::Other(other.to_owned()),
		}
	}

	pub fn label(&self) -> &str {
		match self {
			Self::Weapon => "武器",
			Self::Armor => "护甲",
			Self::Accessory => "饰品",
			Self::Other(s) => s,
		}
	}
}

/// Display name of a minor realm stage (1..=4), `"{n}级"` past that.
pub fn realm_stage_name(level: i64) -> String {
	match level {
		1 => "初期".to_string(),
		2 => "中期".to_string(),
		3 => "后期".to_string(),
		4 => "大圆满".to_string(),
		n => format!("{n}级"),
	}
}

/// Display label for an equipment attribute key.
pub fn attribute_label(key: &str) -> &str {
	match key {
		"attack" => "攻击力",
		"defense" => "防御力",
		"hp_bonus" => "生命值",
		"mp_bonus" => "法力值",
		"crit_rate" => "暴击率",
		"dodge" => "闪避",
		other => other,
	}
}
