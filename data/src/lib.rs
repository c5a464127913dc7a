//! Card records shared between the renderer and the host-facing service.

use anyhow::{Context, Result, bail};

mod hash;
pub use hash::{content_hash, salted_hash};
mod quality;
pub use quality::*;
mod records;
pub use records::*;

/// Which card layout a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
	Player,
	Cultivation,
	Equipment,
	Combat,
}

impl CardKind {
	pub const ALL: [Self; 4] = [Self::Player, Self::Cultivation, Self::Equipment, Self::Combat];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Player => "player",
			Self::Cultivation => "cultivation",
			Self::Equipment => "equipment",
			Self::Combat => "combat",
		}
	}
}

impl std::str::FromStr for CardKind {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"player" => Ok(Self::Player),
			"cultivation" => Ok(Self::Cultivation),
			"equipment" => Ok(Self::Equipment),
			"combat" => Ok(Self::Combat),
			other => bail!("unknown card kind {other:?} (expected player, cultivation, equipment or combat)"),
		}
	}
}

impl std::fmt::Display for CardKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One record of any kind, tagged with `"kind"` when serialized.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardData {
	Player(PlayerCard),
	Cultivation(CultivationCard),
	Equipment(EquipmentCard),
	Combat(CombatCard),
}

impl CardData {
	pub fn kind(&self) -> CardKind {
		match self {
			Self::Player(_) => CardKind::Player,
			Self::Cultivation(_) => CardKind::Cultivation,
			Self::Equipment(_) => CardKind::Equipment,
			Self::Combat(_) => CardKind::Combat,
		}
	}

	/// Parse an untagged record whose kind is known out of band.
	pub fn from_json(kind: CardKind, json: &str) -> Result<Self> {
		let data = match kind {
			CardKind::Player => Self::Player(serde_json::from_str(json).context("Parse player record")?),
			CardKind::Cultivation => Self::Cultivation(serde_json::from_str(json).context("Parse cultivation record")?),
			CardKind::Equipment => Self::Equipment(serde_json::from_str(json).context("Parse equipment record")?),
			CardKind::Combat => Self::Combat(serde_json::from_str(json).context("Parse combat record")?),
		};
		Ok(data)
	}
}
