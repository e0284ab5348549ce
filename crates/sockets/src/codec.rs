use std::ops::Deref;

use socketry_primitives::{AttributeValue, ItemData, NamespacedKey};
use socketry_registry::{EMPTY_SENTINEL, EnhancementRegistry, normalize_name};
use tracing::{debug, trace};

use crate::error::CodecError;

/// Attribute key used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "socketry:sockets";

/// Ordered socket names of one item. Index is the slot number; empty slots
/// hold [`EMPTY_SENTINEL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotList(Vec<String>);

impl SlotList {
	pub fn new() -> Self {
		Self::default()
	}

	/// A list of `n` empty slots.
	pub fn empty(n: usize) -> Self {
		Self(vec![EMPTY_SENTINEL.to_string(); n])
	}

	/// Index of the lowest empty slot.
	pub fn first_empty(&self) -> Option<usize> {
		self.0.iter().position(|name| name == EMPTY_SENTINEL)
	}

	pub fn filled(&self) -> usize {
		self.0.iter().filter(|name| *name != EMPTY_SENTINEL).count()
	}

	pub fn into_vec(self) -> Vec<String> {
		self.0
	}

	pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<String> {
		&mut self.0
	}
}

impl Deref for SlotList {
	type Target = [String];

	fn deref(&self) -> &[String] {
		&self.0
	}
}

impl From<Vec<String>> for SlotList {
	fn from(names: Vec<String>) -> Self {
		Self(names)
	}
}

impl<S: Into<String>> FromIterator<S> for SlotList {
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

/// Reads and writes the slot list stored in an item's attribute store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCodec {
	key: NamespacedKey,
}

impl Default for SlotCodec {
	fn default() -> Self {
		Self::new(NamespacedKey::from_static("socketry", "sockets"))
	}
}

impl SlotCodec {
	pub fn new(key: NamespacedKey) -> Self {
		Self { key }
	}

	pub fn key(&self) -> &NamespacedKey {
		&self.key
	}

	/// Reads the slot list. An absent field is an empty list; nothing is written back.
	pub fn read<I: ItemData + ?Sized>(&self, item: &I) -> Result<SlotList, CodecError> {
		match item.attribute(&self.key) {
			None => Ok(SlotList::new()),
			Some(AttributeValue::TextList(names)) => Ok(SlotList(names.clone())),
			Some(other) => Err(CodecError::UnexpectedValue {
				key: self.key.clone(),
				found: other.type_name(),
			}),
		}
	}

	/// Borrowing read for event handlers. Absent or malformed fields read as no slots.
	pub fn names<'i, I: ItemData + ?Sized>(&self, item: &'i I) -> &'i [String] {
		match item.attribute(&self.key) {
			Some(AttributeValue::TextList(names)) => names,
			Some(other) => {
				trace!(key = %self.key, found = other.type_name(), "slot field is not a text list");
				&[]
			}
			None => &[],
		}
	}

	/// Whether `name` occupies a slot of `item`, compared case-insensitively.
	pub fn contains<I: ItemData + ?Sized>(&self, item: &I, name: &str) -> bool {
		if name == EMPTY_SENTINEL {
			return false;
		}
		let wanted = normalize_name(name);
		self.names(item)
			.iter()
			.any(|slot| normalize_name(slot) == wanted)
	}

	/// Stores `slots` and rebuilds the item's display, one line per slot.
	///
	/// Each line comes from `registry.lookup(name)`, so empty and orphaned
	/// entries both render as the empty socket. Prior display lines are discarded.
	pub fn write<I: ItemData + ?Sized>(
		&self,
		item: &mut I,
		slots: &SlotList,
		registry: &EnhancementRegistry,
	) {
		let display = slots
			.iter()
			.map(|name| registry.lookup(name).display())
			.collect();
		item.set_attribute(self.key.clone(), AttributeValue::TextList(slots.0.clone()));
		item.set_display(display);
		debug!(key = %self.key, slots = slots.len(), filled = slots.filled(), "slot list written");
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use socketry_primitives::{DisplayLine, ItemRecord};
	use socketry_registry::{Candidate, Enhancement, EnhancementDef};

	use super::*;

	struct Glint;

	impl Enhancement for Glint {
		fn name(&self) -> &str {
			"glint"
		}

		fn display(&self) -> DisplayLine {
			DisplayLine::plain("Glint")
		}

		fn is_valid(&self, _: &Candidate<'_>) -> bool {
			true
		}
	}

	fn registry() -> EnhancementRegistry {
		let mut registry = EnhancementRegistry::new();
		registry.register(EnhancementDef::passive(Glint)).unwrap();
		registry
	}

	#[test]
	fn test_absent_field_reads_empty_without_writing() {
		let codec = SlotCodec::default();
		let item = ItemRecord::new("PICKAXE");
		assert_eq!(codec.read(&item).unwrap(), SlotList::new());
		assert!(item.attributes.is_empty());
		assert!(codec.names(&item).is_empty());
	}

	#[test]
	fn test_wrong_type_is_rejected() {
		let codec = SlotCodec::default();
		let mut item = ItemRecord::new("PICKAXE");
		item.set_attribute(codec.key().clone(), AttributeValue::Integer(3));

		assert_eq!(
			codec.read(&item),
			Err(CodecError::UnexpectedValue {
				key: codec.key().clone(),
				found: "integer",
			})
		);
		assert!(codec.names(&item).is_empty());
	}

	#[test]
	fn test_write_replaces_display() {
		let codec = SlotCodec::default();
		let registry = registry();
		let mut item = ItemRecord::new("PICKAXE");
		item.display = vec![DisplayLine::plain("stale")];

		let slots: SlotList = ["glint", "", "renamed"].into_iter().collect();
		codec.write(&mut item, &slots, &registry);

		assert_eq!(codec.read(&item).unwrap(), slots);
		let lines: Vec<_> = item.display.iter().map(DisplayLine::to_plain).collect();
		assert_eq!(lines, vec!["Glint", "[ Empty Socket ]", "[ Empty Socket ]"]);
	}

	#[test]
	fn test_contains_ignores_case_and_empty() {
		let codec = SlotCodec::default();
		let mut item = ItemRecord::new("BOW");
		codec.write(&mut item, &["Glint", ""].into_iter().collect(), &registry());

		assert!(codec.contains(&item, "glint"));
		assert!(!codec.contains(&item, ""));
		assert!(!codec.contains(&item, "blink"));
	}

	#[test]
	fn test_slot_list_helpers() {
		let slots: SlotList = ["a", "", "b", ""].into_iter().collect();
		assert_eq!(slots.first_empty(), Some(1));
		assert_eq!(slots.filled(), 2);
		assert_eq!(SlotList::empty(2).first_empty(), Some(0));
		assert_eq!(SlotList::empty(0).first_empty(), None);
	}
}
