use socketry_primitives::{DisplayLine, Rarity};
use socketry_registry::{Candidate, EffectError, Enhancement, Outcome, Triggered};
use socketry_sockets::SlotCodec;
use tracing::debug;

use super::socket_line;
use crate::events::EntityDamage;
use crate::tool::ToolClass;

/// A killing blow from a weapon captures the creature instead of killing it.
///
/// The damage event is cancelled and the attacker receives the creature's
/// spawn egg. Players are never captured.
#[derive(Debug, Clone)]
pub struct Capturing {
	codec: SlotCodec,
}

impl Capturing {
	pub const NAME: &'static str = "capturing";

	pub fn new(codec: SlotCodec) -> Self {
		Self { codec }
	}
}

impl Enhancement for Capturing {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn display(&self) -> DisplayLine {
		socket_line("Capturing", self.rarity())
	}

	fn rarity(&self) -> Rarity {
		Rarity::Epic
	}

	fn is_valid(&self, candidate: &Candidate<'_>) -> bool {
		ToolClass::of(candidate.item.kind()).is_some_and(ToolClass::is_weapon)
	}
}

impl Triggered<EntityDamage> for Capturing {
	fn trigger(&self, event: &EntityDamage) -> bool {
		!event.target.is_player
			&& event.is_lethal()
			&& self.codec.contains(&event.weapon, Self::NAME)
	}

	fn effect(&self, event: &mut EntityDamage) -> Result<Outcome, EffectError> {
		let kind = event.target.kind.trim();
		if kind.is_empty() {
			return Err(EffectError::MissingContext("target kind"));
		}
		let egg = format!("{}_SPAWN_EGG", kind.to_ascii_uppercase());
		debug!(attacker = %event.attacker, captured = %egg, "creature captured");
		event.captured = Some(egg);
		Ok(Outcome::Cancel)
	}
}

#[cfg(test)]
mod tests {
	use socketry_primitives::{AttributeValue, ItemData, ItemRecord};

	use super::*;
	use crate::events::Target;

	fn hit(target: &str, health: f64, damage: f64) -> EntityDamage {
		let mut weapon = ItemRecord::new("DIAMOND_SWORD");
		weapon.set_attribute(
			SlotCodec::default().key().clone(),
			AttributeValue::TextList(vec!["capturing".into()]),
		);
		EntityDamage {
			attacker: "alex".into(),
			weapon,
			target: Target {
				kind: target.into(),
				health,
				is_player: false,
			},
			damage,
			captured: None,
		}
	}

	#[test]
	fn test_lethal_hit_captures() {
		let capturing = Capturing::new(SlotCodec::default());
		let mut event = hit("cow", 2.0, 5.0);

		assert!(capturing.trigger(&event));
		assert_eq!(capturing.effect(&mut event), Ok(Outcome::Cancel));
		assert_eq!(event.captured.as_deref(), Some("COW_SPAWN_EGG"));
	}

	#[test]
	fn test_non_lethal_and_players_are_ignored() {
		let capturing = Capturing::new(SlotCodec::default());
		assert!(!capturing.trigger(&hit("cow", 10.0, 5.0)));

		let mut player = hit("player", 1.0, 5.0);
		player.target.is_player = true;
		assert!(!capturing.trigger(&player));
	}

	#[test]
	fn test_missing_target_kind_fails() {
		let capturing = Capturing::new(SlotCodec::default());
		let mut event = hit(" ", 1.0, 5.0);
		assert_eq!(
			capturing.effect(&mut event),
			Err(EffectError::MissingContext("target kind"))
		);
		assert!(event.captured.is_none());
	}
}
