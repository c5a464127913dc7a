use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::CardData;

/// Stable content key for a record: hex SHA-256 over the kind tag and the
/// record's JSON. Equal records always hash equal; any field change moves it.
pub fn content_hash(card: &CardData) -> Result<String> {
	digest(card, None)
}

/// [`content_hash`] with `salt` mixed in, for keys that must also move when
/// something outside the record (render settings) changes.
pub fn salted_hash(card: &CardData, salt: &str) -> Result<String> {
	digest(card, Some(salt))
}

fn digest(card: &CardData, salt: Option<&str>) -> Result<String> {
	let json = serde_json::to_vec(card).context("Serialize card for hashing")?;
	let mut hasher = Sha256::new();
	hasher.update(card.kind().as_str().as_bytes());
	hasher.update([0u8]);
	hasher.update(&json);
	if let Some(salt) = salt {
		hasher.update([0u8]);
		hasher.update(salt.as_bytes());
	}
	Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{CombatCard, PlayerCard};

	#[test]
	fn same_record_same_hash() {
		let a = CardData::Player(PlayerCard::default());
		let b = CardData::Player(PlayerCard::default());
		assert_eq!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
		assert_eq!(content_hash(&a).unwrap().len(), 64);
	}

	#[test]
	fn field_change_moves_hash() {
		let a = CardData::Player(PlayerCard::default());
		let b = CardData::Player(PlayerCard { hp: 99, ..Default::default() });
		assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
	}

	#[test]
	fn salt_moves_hash() {
		let a = CardData::Player(PlayerCard::default());
		let plain = content_hash(&a).unwrap();
		let x = salted_hash(&a, "radial").unwrap();
		let y = salted_hash(&a, "solid").unwrap();
		assert_ne!(x, y);
		assert_ne!(plain, x);
		assert_eq!(x, salted_hash(&a, "radial").unwrap());
		assert_ne!(plain, salted_hash(&a, "").unwrap());
	}

	#[test]
	fn kind_is_part_of_the_key() {
		let a = CardData::Combat(CombatCard::default());
		let b = CardData::Player(PlayerCard::default());
		assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
	}
}
