use serde::{Deserialize, Serialize};

use crate::display::Tone;

/// Rarity tier of an enhancement.
///
/// Only consulted when drawing enhancements at random; nothing else in the
/// system treats tiers differently.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
	#[default]
	Common,
	Uncommon,
	Rare,
	Epic,
	Legendary,
}

impl Rarity {
	pub const ALL: [Rarity; 5] = [
		Rarity::Common,
		Rarity::Uncommon,
		Rarity::Rare,
		Rarity::Epic,
		Rarity::Legendary,
	];

	/// Relative draw weight. Higher tiers are rarer.
	pub const fn weight(self) -> u32 {
		match self {
			Self::Common => 60,
			Self::Uncommon => 25,
			Self::Rare => 10,
			Self::Epic => 4,
			Self::Legendary => 1,
		}
	}

	pub const fn tone(self) -> Tone {
		match self {
			Self::Common => Tone::Gray,
			Self::Uncommon => Tone::Green,
			Self::Rare => Tone::Blue,
			Self::Epic => Tone::LightPurple,
			Self::Legendary => Tone::Gold,
		}
	}

	pub const fn label(self) -> &'static str {
		match self {
			Self::Common => "common",
			Self::Uncommon => "uncommon",
			Self::Rare => "rare",
			Self::Epic => "epic",
			Self::Legendary => "legendary",
		}
	}
}

impl std::fmt::Display for Rarity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}
