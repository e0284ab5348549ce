use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use socketry_primitives::ItemKind;

/// Capacity for kinds missing from the table.
pub const DEFAULT_CAPACITY: usize = 1;

/// Maximum socket count per item kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityTable {
	#[serde(default = "default_capacity")]
	pub default: usize,
	#[serde(default)]
	pub kinds: BTreeMap<ItemKind, usize>,
}

fn default_capacity() -> usize {
	DEFAULT_CAPACITY
}

impl Default for CapacityTable {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

impl CapacityTable {
	pub fn new(default: usize) -> Self {
		Self {
			default,
			kinds: BTreeMap::new(),
		}
	}

	/// Builder form of [`set`](Self::set).
	pub fn with(mut self, kind: impl Into<ItemKind>, capacity: usize) -> Self {
		self.set(kind, capacity);
		self
	}

	pub fn set(&mut self, kind: impl Into<ItemKind>, capacity: usize) -> Option<usize> {
		self.kinds.insert(kind.into(), capacity)
	}

	pub fn capacity_of(&self, kind: &ItemKind) -> usize {
		self.kinds.get(kind).copied().unwrap_or(self.default)
	}
}
