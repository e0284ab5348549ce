use socketry_primitives::DisplayLine;
use socketry_registry::{Candidate, Enhancement};

use super::socket_line;

/// Cosmetic only; the host renders socketed items with a glint.
#[derive(Debug, Clone, Copy, Default)]
pub struct Glowing;

impl Glowing {
	pub const NAME: &'static str = "glowing";
}

impl Enhancement for Glowing {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn display(&self) -> DisplayLine {
		socket_line("Glowing", self.rarity())
	}

	fn is_valid(&self, _: &Candidate<'_>) -> bool {
		true
	}
}
