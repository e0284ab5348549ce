use rand::Rng;
use socketry_primitives::ItemData;
use socketry_registry::{
	Candidate, EMPTY_SENTINEL, Enhancement, EnhancementRegistry, Resolution, normalize_name,
};
use tracing::{debug, warn};

use crate::capacity::CapacityTable;
use crate::codec::{SlotCodec, SlotList};
use crate::error::{CodecError, SlotError};
use crate::select::pick_weighted;

#[cfg(test)]
mod tests;

/// What [`SlotState::pop_entry`] took out of a socket.
#[derive(Debug, Clone)]
pub enum Popped<'r> {
	Registered(&'r dyn Enhancement),
	/// A name with no registered enhancement.
	Orphaned(String),
}

impl Popped<'_> {
	pub fn name(&self) -> &str {
		match self {
			Self::Registered(enhancement) => enhancement.name(),
			Self::Orphaned(name) => name,
		}
	}
}

/// Everything a [`SlotState`] needs besides the item itself.
///
/// Built once next to the registry and handed out by reference.
#[derive(Debug, Clone, Copy)]
pub struct SocketContext<'r> {
	pub registry: &'r EnhancementRegistry,
	pub codec: &'r SlotCodec,
	pub capacities: &'r CapacityTable,
}

impl<'r> SocketContext<'r> {
	pub fn new(
		registry: &'r EnhancementRegistry,
		codec: &'r SlotCodec,
		capacities: &'r CapacityTable,
	) -> Self {
		Self {
			registry,
			codec,
			capacities,
		}
	}

	/// Reads `item`'s slot list and wraps both in a [`SlotState`].
	pub fn open<I: ItemData>(&self, item: I) -> Result<SlotState<'r, I>, CodecError> {
		let slots = self.codec.read(&item)?;
		let capacity = self.capacities.capacity_of(item.kind());
		Ok(SlotState {
			registry: self.registry,
			codec: self.codec,
			capacity,
			item,
			slots,
		})
	}
}

/// Editable view of one item's sockets.
///
/// Mutations only touch the in-memory list; [`commit`](Self::commit) writes
/// it back and regenerates the item's display. Dropping the state discards
/// every change.
pub struct SlotState<'r, I: ItemData> {
	registry: &'r EnhancementRegistry,
	codec: &'r SlotCodec,
	capacity: usize,
	item: I,
	slots: SlotList,
}

impl<'r, I: ItemData> SlotState<'r, I> {
	/// Maximum sockets for the item's kind.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Sockets the item currently has, filled or empty.
	pub fn occupancy(&self) -> usize {
		self.slots.len()
	}

	pub fn filled(&self) -> usize {
		self.slots.filled()
	}

	pub fn has_empty_slot(&self) -> bool {
		self.slots.first_empty().is_some()
	}

	/// Whether `name` is bound. The empty name never matches.
	pub fn has(&self, name: &str) -> bool {
		self.position(name).is_some()
	}

	pub fn slots(&self) -> &SlotList {
		&self.slots
	}

	pub fn item(&self) -> &I {
		&self.item
	}

	pub fn registry(&self) -> &'r EnhancementRegistry {
		self.registry
	}

	/// The item as enhancements see it when deciding validity.
	pub fn candidate(&self) -> Candidate<'_> {
		Candidate {
			item: &self.item,
			occupancy: self.occupancy(),
			capacity: self.capacity,
		}
	}

	/// Appends `n` empty sockets without checking capacity.
	///
	/// Callers that must respect the capacity use [`try_add_slots`](Self::try_add_slots).
	/// A count the list cannot grow by is ignored and logged.
	pub fn add_slots(&mut self, n: usize) {
		let slots = self.slots.as_mut_vec();
		if let Err(err) = slots.try_reserve(n) {
			warn!(requested = n, error = %err, "cannot grow socket list");
			return;
		}
		slots.resize(slots.len() + n, EMPTY_SENTINEL.to_string());
		if self.occupancy() > self.capacity {
			debug!(
				kind = %self.item.kind(),
				occupancy = self.occupancy(),
				capacity = self.capacity,
				"sockets added beyond capacity"
			);
		} else {
			debug!(added = n, occupancy = self.occupancy(), "sockets added");
		}
	}

	/// Appends `n` empty sockets if the result stays within capacity.
	pub fn try_add_slots(&mut self, n: usize) -> Result<(), SlotError> {
		let occupancy = self.occupancy();
		if occupancy.saturating_add(n) > self.capacity {
			return Err(SlotError::CapacityExceeded {
				requested: n,
				occupancy,
				capacity: self.capacity,
			});
		}
		self.add_slots(n);
		Ok(())
	}

	/// Puts `enhancement` into the lowest empty socket.
	///
	/// Returns false, leaving the list untouched, if the enhancement rejects
	/// the item, is already bound, or no socket is empty.
	pub fn bind(&mut self, enhancement: &dyn Enhancement) -> bool {
		self.try_bind(enhancement).is_ok()
	}

	/// [`bind`](Self::bind) with the reason for a refusal. Yields the slot index on success.
	pub fn try_bind(&mut self, enhancement: &dyn Enhancement) -> Result<usize, SlotError> {
		if enhancement.is_empty_slot() {
			return Err(SlotError::EmptySentinel);
		}
		let name = normalize_name(enhancement.name()).into_owned();
		if !enhancement.is_valid(&self.candidate()) {
			return Err(SlotError::NotApplicable { name });
		}
		if self.has(&name) {
			return Err(SlotError::AlreadyBound { name });
		}
		let Some(index) = self.slots.first_empty() else {
			return Err(SlotError::NoEmptySlot);
		};

		debug!(enhancement = %name, slot = index, "enhancement bound");
		self.slots.as_mut_vec()[index] = name;
		Ok(index)
	}

	/// Empties the socket holding `name`. The list never shrinks.
	pub fn remove(&mut self, name: &str) -> bool {
		self.try_remove(name).is_ok()
	}

	/// [`remove`](Self::remove) with the reason for a refusal. Yields the emptied index.
	pub fn try_remove(&mut self, name: &str) -> Result<usize, SlotError> {
		let Some(index) = self.position(name) else {
			return Err(SlotError::NotBound {
				name: name.to_string(),
			});
		};
		let removed = std::mem::replace(
			&mut self.slots.as_mut_vec()[index],
			EMPTY_SENTINEL.to_string(),
		);
		debug!(enhancement = %removed, slot = index, "enhancement removed");
		Ok(index)
	}

	/// Removes the last filled socket of the leading filled run.
	///
	/// Scanning stops at the first empty socket, so with `["a", "b", "", "c"]`
	/// this takes `b` and leaves `c` in place. Returns the empty slot, without
	/// touching the list, when the first socket is empty or there are none.
	/// An orphaned name in that position is left in place and the empty slot
	/// is returned; [`pop_entry`](Self::pop_entry) removes orphans too.
	pub fn pop(&mut self) -> &'r dyn Enhancement {
		let registry = self.registry;
		let Some(index) = self.last_in_prefix() else {
			return registry.empty_slot();
		};
		let name = &self.slots[index];
		let Some(enhancement) = registry.get(name) else {
			debug!(enhancement = %name, slot = index, "orphaned socket not popped");
			return registry.empty_slot();
		};
		self.clear(index);
		enhancement
	}

	/// [`pop`](Self::pop) that also takes orphaned names. `None` means nothing changed.
	pub fn pop_entry(&mut self) -> Option<Popped<'r>> {
		let index = self.last_in_prefix()?;
		let name = self.clear(index);
		match self.registry.get(&name) {
			Some(enhancement) => Some(Popped::Registered(enhancement)),
			None => {
				warn!(enhancement = %name, "popped an orphaned enhancement");
				Some(Popped::Orphaned(name))
			}
		}
	}

	fn last_in_prefix(&self) -> Option<usize> {
		self.slots
			.iter()
			.take_while(|name| *name != EMPTY_SENTINEL)
			.count()
			.checked_sub(1)
	}

	fn clear(&mut self, index: usize) -> String {
		let name = std::mem::replace(
			&mut self.slots.as_mut_vec()[index],
			EMPTY_SENTINEL.to_string(),
		);
		debug!(enhancement = %name, slot = index, "enhancement popped");
		name
	}

	/// Bound enhancements that resolve, in slot order.
	pub fn enhancements(&self) -> impl Iterator<Item = &'r dyn Enhancement> + '_ {
		let registry = self.registry;
		self.slots.iter().filter_map(move |name| registry.get(name))
	}

	/// Bound names that no longer resolve to a registered enhancement.
	pub fn orphans(&self) -> impl Iterator<Item = &str> + '_ {
		let registry = self.registry;
		self.slots
			.iter()
			.filter(move |name| registry.resolve(name).is_orphaned())
			.map(String::as_str)
	}

	/// Per-slot resolution, empty slots included.
	pub fn resolved(&self) -> impl Iterator<Item = Resolution<'_>> + '_ {
		let registry = self.registry;
		self.slots.iter().map(move |name| registry.resolve(name))
	}

	/// Draws an unbound enhancement that accepts this item, weighted by rarity.
	pub fn random_applicable<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'r dyn Enhancement> {
		let candidate = self.candidate();
		let registry = self.registry;
		pick_weighted(
			registry
				.all()
				.filter(|e| !self.has(e.name()) && e.is_valid(&candidate)),
			rng,
		)
	}

	/// Writes the slot list back and hands the item over.
	pub fn commit(mut self) -> I {
		self.codec.write(&mut self.item, &self.slots, self.registry);
		self.item
	}

	fn position(&self, name: &str) -> Option<usize> {
		if name == EMPTY_SENTINEL {
			return None;
		}
		let wanted = normalize_name(name);
		self.slots
			.iter()
			.position(|slot| slot != EMPTY_SENTINEL && normalize_name(slot) == wanted)
	}
}

impl<I: ItemData + std::fmt::Debug> std::fmt::Debug for SlotState<'_, I> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SlotState")
			.field("item", &self.item)
			.field("capacity", &self.capacity)
			.field("slots", &self.slots)
			.finish_non_exhaustive()
	}
}
