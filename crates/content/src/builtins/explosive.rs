use socketry_primitives::{DisplayLine, Rarity};
use socketry_registry::{Candidate, EffectError, Enhancement, Outcome, Triggered};
use socketry_sockets::SlotCodec;
use tracing::debug;

use super::socket_line;
use crate::events::BlockBreak;
use crate::tool::ToolClass;

/// Digging tools break the surrounding cube along with the mined block.
#[derive(Debug, Clone)]
pub struct Explosive {
	codec: SlotCodec,
	radius: i32,
}

impl Explosive {
	pub const NAME: &'static str = "explosive";
	/// Largest radius [`with_radius`](Self::with_radius) accepts.
	pub const MAX_RADIUS: i32 = 4;

	pub fn new(codec: SlotCodec) -> Self {
		Self { codec, radius: 1 }
	}

	pub fn with_radius(mut self, radius: i32) -> Self {
		self.radius = radius.clamp(0, Self::MAX_RADIUS);
		self
	}
}

impl Enhancement for Explosive {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn display(&self) -> DisplayLine {
		socket_line("Explosive", self.rarity())
	}

	fn rarity(&self) -> Rarity {
		Rarity::Rare
	}

	fn is_valid(&self, candidate: &Candidate<'_>) -> bool {
		ToolClass::of(candidate.item.kind()).is_some_and(ToolClass::is_digging)
	}
}

impl Triggered<BlockBreak> for Explosive {
	fn trigger(&self, event: &BlockBreak) -> bool {
		self.codec.contains(&event.tool, Self::NAME)
	}

	fn effect(&self, event: &mut BlockBreak) -> Result<Outcome, EffectError> {
		let r = self.radius;
		let center = event.block;
		for dx in -r..=r {
			for dy in -r..=r {
				for dz in -r..=r {
					if (dx, dy, dz) != (0, 0, 0) {
						event.extra_breaks.push(center.offset(dx, dy, dz));
					}
				}
			}
		}
		debug!(
			player = %event.player,
			blocks = event.extra_breaks.len(),
			"explosive break"
		);
		Ok(Outcome::Continue)
	}
}
