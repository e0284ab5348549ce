use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeStore, AttributeValue, NamespacedKey};
use crate::display::DisplayLine;
use crate::kind::ItemKind;

/// Host-side view of a persistent item.
///
/// The socket machinery only touches an item through this trait: its kind, a
/// namespaced attribute store, and the multi-line display text. Hosts with
/// their own item representation implement it directly; [`ItemRecord`] is the
/// bundled implementation.
pub trait ItemData {
	fn kind(&self) -> &ItemKind;

	fn attribute(&self, key: &NamespacedKey) -> Option<&AttributeValue>;

	fn set_attribute(&mut self, key: NamespacedKey, value: AttributeValue);

	fn remove_attribute(&mut self, key: &NamespacedKey) -> Option<AttributeValue>;

	fn display(&self) -> &[DisplayLine];

	/// Replaces the entire display with `lines`.
	fn set_display(&mut self, lines: Vec<DisplayLine>);
}

impl<T: ItemData + ?Sized> ItemData for &mut T {
	fn kind(&self) -> &ItemKind {
		(**self).kind()
	}

	fn attribute(&self, key: &NamespacedKey) -> Option<&AttributeValue> {
		(**self).attribute(key)
	}

	fn set_attribute(&mut self, key: NamespacedKey, value: AttributeValue) {
		(**self).set_attribute(key, value)
	}

	fn remove_attribute(&mut self, key: &NamespacedKey) -> Option<AttributeValue> {
		(**self).remove_attribute(key)
	}

	fn display(&self) -> &[DisplayLine] {
		(**self).display()
	}

	fn set_display(&mut self, lines: Vec<DisplayLine>) {
		(**self).set_display(lines)
	}
}

/// Plain serializable item: a kind, an attribute store and display lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
	pub kind: ItemKind,
	#[serde(default, skip_serializing_if = "AttributeStore::is_empty")]
	pub attributes: AttributeStore,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub display: Vec<DisplayLine>,
}

impl ItemRecord {
	pub fn new(kind: impl Into<ItemKind>) -> Self {
		Self {
			kind: kind.into(),
			attributes: AttributeStore::new(),
			display: Vec::new(),
		}
	}
}

impl ItemData for ItemRecord {
	fn kind(&self) -> &ItemKind {
		&self.kind
	}

	fn attribute(&self, key: &NamespacedKey) -> Option<&AttributeValue> {
		self.attributes.get(key)
	}

	fn set_attribute(&mut self, key: NamespacedKey, value: AttributeValue) {
		self.attributes.set(key, value);
	}

	fn remove_attribute(&mut self, key: &NamespacedKey) -> Option<AttributeValue> {
		self.attributes.remove(key)
	}

	fn display(&self) -> &[DisplayLine] {
		&self.display
	}

	fn set_display(&mut self, lines: Vec<DisplayLine>) {
		self.display = lines;
	}
}
