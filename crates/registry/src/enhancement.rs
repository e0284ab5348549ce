//! Enhancement traits, the empty-slot singleton and registration definitions.

use std::borrow::Cow;
use std::sync::Arc;

use socketry_primitives::{DisplayLine, ItemData, Rarity, Tone};
use thiserror::Error;

use crate::aggregation::{AggregationTable, SubscribeAction};
use crate::error::RegistryError;
use crate::event::{Event, EventKind};

/// Name stored in a slot list for an unfilled socket.
pub const EMPTY_SENTINEL: &str = "";

/// The single [`EmptySlot`] instance every registry resolves unknown names to.
pub static EMPTY_SLOT: EmptySlot = EmptySlot;

/// Lower-cases `name` for registry keys, borrowing when already normalized.
pub fn normalize_name(name: &str) -> Cow<'_, str> {
	if name.chars().any(char::is_uppercase) {
		Cow::Owned(name.to_lowercase())
	} else {
		Cow::Borrowed(name)
	}
}

/// An item being considered for an enhancement, together with its socket counts.
#[derive(Clone, Copy)]
pub struct Candidate<'a> {
	pub item: &'a dyn ItemData,
	/// Number of sockets the item currently has, filled or not.
	pub occupancy: usize,
	/// Maximum number of sockets for the item's kind.
	pub capacity: usize,
}

impl std::fmt::Debug for Candidate<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Candidate")
			.field("kind", self.item.kind())
			.field("occupancy", &self.occupancy)
			.field("capacity", &self.capacity)
			.finish()
	}
}

/// A named behavior that can occupy an item socket.
///
/// Implementations are constructed once at startup and never mutated after
/// registration, so they must be shareable across threads.
pub trait Enhancement: Send + Sync + 'static {
	/// Unique identifier. Registry keys are the lower-cased form.
	fn name(&self) -> &str;

	/// Line shown in the item's description while this enhancement is socketed.
	fn display(&self) -> DisplayLine;

	/// Tier used for weighted random selection.
	fn rarity(&self) -> Rarity {
		Rarity::Common
	}

	/// Whether this enhancement may be bound to `candidate`.
	fn is_valid(&self, candidate: &Candidate<'_>) -> bool;

	/// True only for the empty-slot sentinel.
	fn is_empty_slot(&self) -> bool {
		self.name() == EMPTY_SENTINEL
	}
}

impl std::fmt::Debug for dyn Enhancement + '_ {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Enhancement")
			.field("name", &self.name())
			.field("rarity", &self.rarity())
			.finish()
	}
}

/// What an effect asks of the host once it has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
	/// Let the event proceed.
	#[default]
	Continue,
	/// Ask the host to cancel the triggering event.
	Cancel,
}

/// Failure reported by an effect. Logged by the dispatcher; siblings still run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
	/// The event lacked something the effect needs.
	#[error("missing context: {0}")]
	MissingContext(&'static str),
	/// The effect ran but could not complete.
	#[error("{0}")]
	Failed(String),
}

/// An enhancement bound to exactly one event type.
pub trait Triggered<E: Event>: Enhancement {
	/// Whether this behavior should react to `event`.
	fn trigger(&self, event: &E) -> bool;

	/// Applies the behavior. Only called after [`trigger`](Self::trigger) returned true.
	fn effect(&self, event: &mut E) -> Result<Outcome, EffectError>;
}

/// Socket placeholder. Valid for an item while it has room for another socket.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySlot;

impl Enhancement for EmptySlot {
	fn name(&self) -> &str {
		EMPTY_SENTINEL
	}

	fn display(&self) -> DisplayLine {
		DisplayLine::styled("[ Empty Socket ]", Tone::DarkGray)
	}

	fn is_valid(&self, candidate: &Candidate<'_>) -> bool {
		candidate.occupancy < candidate.capacity
	}
}

/// Subscribes a behavior, optionally at a given bucket position.
pub(crate) type Subscriber = Box<
	dyn FnOnce(&mut AggregationTable, Option<usize>) -> Result<SubscribeAction, RegistryError>
		+ Send,
>;

struct Subscription {
	kind: EventKind,
	subscribe: Subscriber,
}

/// A registration request: an enhancement plus, for active variants, its event binding.
pub struct EnhancementDef {
	enhancement: Arc<dyn Enhancement>,
	subscription: Option<Subscription>,
}

impl EnhancementDef {
	/// A passive enhancement: queryable, never dispatched.
	pub fn passive<T: Enhancement>(enhancement: T) -> Self {
		Self {
			enhancement: Arc::new(enhancement),
			subscription: None,
		}
	}

	/// An active enhancement subscribed to events of type `E`.
	pub fn active<E, T>(enhancement: T) -> Self
	where
		E: Event,
		T: Triggered<E>,
	{
		let shared = Arc::new(enhancement);
		let behavior = Arc::clone(&shared);
		Self {
			enhancement: shared,
			subscription: Some(Subscription {
				kind: EventKind::of::<E>(),
				subscribe: Box::new(move |table, at| table.subscribe_at::<E, T>(behavior, at)),
			}),
		}
	}

	pub fn name(&self) -> &str {
		self.enhancement.name()
	}

	/// Event kind for active variants, `None` for passive ones.
	pub fn event_kind(&self) -> Option<EventKind> {
		self.subscription.as_ref().map(|s| s.kind)
	}

	pub fn is_active(&self) -> bool {
		self.subscription.is_some()
	}

	pub(crate) fn into_parts(self) -> (Arc<dyn Enhancement>, Option<(EventKind, Subscriber)>) {
		(
			self.enhancement,
			self.subscription.map(|s| (s.kind, s.subscribe)),
		)
	}
}

impl std::fmt::Debug for EnhancementDef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EnhancementDef")
			.field("name", &self.name())
			.field("event", &self.event_kind().map(EventKind::name))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use socketry_primitives::ItemRecord;

	use super::*;

	#[test]
	fn test_normalize_name_borrows_lowercase() {
		assert!(matches!(normalize_name("explosive"), Cow::Borrowed("explosive")));
		assert_eq!(normalize_name("Explosive"), "explosive");
	}

	#[test]
	fn test_empty_slot_validity_tracks_capacity() {
		let item = ItemRecord::new("PICKAXE");
		let room = Candidate {
			item: &item,
			occupancy: 2,
			capacity: 3,
		};
		let full = Candidate {
			occupancy: 3,
			..room
		};
		assert!(EMPTY_SLOT.is_valid(&room));
		assert!(!EMPTY_SLOT.is_valid(&full));
		assert!(EMPTY_SLOT.is_empty_slot());
	}
}
