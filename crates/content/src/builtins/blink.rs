use socketry_primitives::{DisplayLine, Rarity};
use socketry_registry::{Candidate, EffectError, Enhancement, Outcome, Triggered};
use socketry_sockets::SlotCodec;
use tracing::debug;

use super::socket_line;
use crate::events::PlayerInteract;

/// Right-clicking teleports the player a fixed distance along their look direction.
#[derive(Debug, Clone)]
pub struct Blink {
	codec: SlotCodec,
	distance: f64,
}

impl Blink {
	pub const NAME: &'static str = "blink";
	pub const DEFAULT_DISTANCE: f64 = 8.0;

	pub fn new(codec: SlotCodec) -> Self {
		Self {
			codec,
			distance: Self::DEFAULT_DISTANCE,
		}
	}

	pub fn with_distance(mut self, distance: f64) -> Self {
		self.distance = distance;
		self
	}
}

impl Enhancement for Blink {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn display(&self) -> DisplayLine {
		socket_line("Blink", self.rarity())
	}

	fn rarity(&self) -> Rarity {
		Rarity::Uncommon
	}

	fn is_valid(&self, _: &Candidate<'_>) -> bool {
		true
	}
}

impl Triggered<PlayerInteract> for Blink {
	fn trigger(&self, event: &PlayerInteract) -> bool {
		event.action.is_right_click() && self.codec.contains(&event.item, Self::NAME)
	}

	fn effect(&self, event: &mut PlayerInteract) -> Result<Outcome, EffectError> {
		let dir = event
			.facing
			.normalized()
			.ok_or(EffectError::MissingContext("look direction"))?;
		let target = event.position.add_scaled(dir, self.distance);
		debug!(player = %event.player, ?target, "blink");
		event.teleport = Some(target);
		// Right-click on a block would otherwise also place or use it.
		Ok(Outcome::Cancel)
	}
}

#[cfg(test)]
mod tests {
	use socketry_primitives::{AttributeValue, ItemData, ItemRecord};

	use super::*;
	use crate::events::{Interaction, Vec3};

	fn interact(action: Interaction, facing: Vec3) -> PlayerInteract {
		let mut item = ItemRecord::new("BLAZE_ROD");
		item.set_attribute(
			SlotCodec::default().key().clone(),
			AttributeValue::TextList(vec!["blink".into()]),
		);
		PlayerInteract {
			player: "alex".into(),
			item,
			action,
			position: Vec3::new(10.0, 64.0, 10.0),
			facing,
			teleport: None,
		}
	}

	#[test]
	fn test_right_click_teleports_along_facing() {
		let blink = Blink::new(SlotCodec::default());
		let mut event = interact(Interaction::RightClickAir, Vec3::new(0.0, 0.0, 2.0));

		assert!(blink.trigger(&event));
		assert_eq!(blink.effect(&mut event), Ok(Outcome::Cancel));
		assert_eq!(event.teleport, Some(Vec3::new(10.0, 64.0, 18.0)));
	}

	#[test]
	fn test_left_click_does_nothing() {
		let blink = Blink::new(SlotCodec::default());
		assert!(!blink.trigger(&interact(Interaction::LeftClick, Vec3::new(1.0, 0.0, 0.0))));
	}

	#[test]
	fn test_zero_facing_is_missing_context() {
		let blink = Blink::new(SlotCodec::default()).with_distance(4.0);
		let mut event = interact(Interaction::RightClickBlock, Vec3::default());
		assert!(blink.effect(&mut event).is_err());
		assert!(event.teleport.is_none());
	}
}
