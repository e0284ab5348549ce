use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Marker for values the host delivers to enhancements.
///
/// Each implementing type is its own event kind; behaviors subscribe to a
/// concrete type and receive it strongly typed.
pub trait Event: 'static {
	/// Stable name used in logs and listings (e.g. `"block:break"`).
	const NAME: &'static str;
}

/// Runtime tag of an [`Event`] type.
///
/// Equality and hashing consider only the type identity; the name rides along
/// for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct EventKind {
	id: TypeId,
	name: &'static str,
}

impl EventKind {
	pub fn of<E: Event>() -> Self {
		Self {
			id: TypeId::of::<E>(),
			name: E::NAME,
		}
	}

	#[inline]
	pub fn name(self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn type_id(self) -> TypeId {
		self.id
	}

	#[inline]
	pub fn is<E: Event>(self) -> bool {
		self.id == TypeId::of::<E>()
	}
}

impl PartialEq for EventKind {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for EventKind {}

impl Hash for EventKind {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl std::fmt::Display for EventKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}
