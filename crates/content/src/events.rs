//! Game events the bundled enhancements subscribe to.
//!
//! Each event carries the item involved, so behaviors can check the item's
//! sockets themselves. Fields past the item are the event's context plus the
//! results effects write back for the host.

use serde::{Deserialize, Serialize};
use socketry_primitives::ItemRecord;
use socketry_registry::Event;

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
	pub x: i32,
	pub y: i32,
	pub z: i32,
}

impl BlockPos {
	pub const fn new(x: i32, y: i32, z: i32) -> Self {
		Self { x, y, z }
	}

	/// Shifted position; coordinates saturate at the `i32` bounds.
	pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
		Self::new(
			self.x.saturating_add(dx),
			self.y.saturating_add(dy),
			self.z.saturating_add(dz),
		)
	}
}

/// World-space position or direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
	}

	/// Unit vector in the same direction, or `None` for the zero vector.
	pub fn normalized(self) -> Option<Self> {
		let len = self.length();
		(len > f64::EPSILON).then(|| Self::new(self.x / len, self.y / len, self.z / len))
	}

	pub fn add_scaled(self, dir: Self, by: f64) -> Self {
		Self::new(self.x + dir.x * by, self.y + dir.y * by, self.z + dir.z * by)
	}
}

/// A player breaking a block with `tool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockBreak {
	pub player: String,
	pub tool: ItemRecord,
	pub block: BlockPos,
	/// Additional blocks effects want broken alongside `block`.
	#[serde(default)]
	pub extra_breaks: Vec<BlockPos>,
}

impl Event for BlockBreak {
	const NAME: &'static str = "block:break";
}

impl BlockBreak {
	pub fn new(player: impl Into<String>, tool: ItemRecord, block: BlockPos) -> Self {
		Self {
			player: player.into(),
			tool,
			block,
			extra_breaks: Vec::new(),
		}
	}
}

/// The entity on the receiving end of an [`EntityDamage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
	/// Entity type, e.g. `ZOMBIE`.
	pub kind: String,
	pub health: f64,
	#[serde(default)]
	pub is_player: bool,
}

/// An entity hit by a player's `weapon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDamage {
	pub attacker: String,
	pub weapon: ItemRecord,
	pub target: Target,
	pub damage: f64,
	/// Item kind handed to the attacker when the target was captured.
	#[serde(default)]
	pub captured: Option<String>,
}

impl Event for EntityDamage {
	const NAME: &'static str = "entity:damage";
}

impl EntityDamage {
	pub fn is_lethal(&self) -> bool {
		self.damage >= self.target.health
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
	LeftClick,
	RightClickAir,
	RightClickBlock,
}

impl Interaction {
	pub fn is_right_click(self) -> bool {
		matches!(self, Self::RightClickAir | Self::RightClickBlock)
	}
}

/// A player using the item in hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInteract {
	pub player: String,
	pub item: ItemRecord,
	pub action: Interaction,
	pub position: Vec3,
	/// Look direction; need not be normalized.
	pub facing: Vec3,
	/// Where effects want the player moved.
	#[serde(default)]
	pub teleport: Option<Vec3>,
}

impl Event for PlayerInteract {
	const NAME: &'static str = "player:interact";
}
