use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, info, warn};

use crate::aggregation::{AggregationBucket, AggregationTable, BucketHandler, SubscribeAction};
use crate::enhancement::{
	EMPTY_SENTINEL, EMPTY_SLOT, Enhancement, EnhancementDef, Triggered, normalize_name,
};
use crate::error::RegistryError;
use crate::event::{Event, EventKind};
use crate::host::EventHost;


/// Result of a name insertion.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Name was new; definition inserted.
	InsertedNew,
	/// Name existed; the new definition replaced it in place.
	ReplacedExisting,
}

/// Outcome of [`EnhancementRegistry::register`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Registration {
	pub action: InsertAction,
	/// Bucket result for active variants, `None` for passive ones.
	pub subscription: Option<SubscribeAction>,
}

/// How a stored slot name resolves.
#[derive(Clone, Copy, Debug)]
pub enum Resolution<'a> {
	/// The empty sentinel.
	Empty,
	/// A registered enhancement.
	Registered(&'a dyn Enhancement),
	/// A non-empty name with no registered enhancement.
	Orphaned(&'a str),
}

impl<'a> Resolution<'a> {
	/// Collapses orphans into the empty slot, as [`EnhancementRegistry::lookup`] does.
	pub fn enhancement(self) -> &'a dyn Enhancement {
		match self {
			Self::Registered(e) => e,
			Self::Empty | Self::Orphaned(_) => &EMPTY_SLOT,
		}
	}

	pub fn is_orphaned(self) -> bool {
		matches!(self, Self::Orphaned(_))
	}
}

/// Owner of every enhancement and of the per-event aggregation buckets.
///
/// Built once by the process entry point, filled with [`register`](Self::register)
/// calls, then [`activate`](Self::activate)d exactly once. After activation it
/// is read-only and may be shared across threads.
pub struct EnhancementRegistry {
	by_name: IndexMap<Box<str>, Arc<dyn Enhancement>, FxBuildHasher>,
	table: AggregationTable,
	activated: bool,
}

impl std::fmt::Debug for EnhancementRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EnhancementRegistry")
			.field("enhancements", &self.by_name.keys().collect::<Vec<_>>())
			.field("buckets", &self.table.len())
			.field("activated", &self.activated)
			.finish()
	}
}

impl Default for EnhancementRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl EnhancementRegistry {
	pub fn new() -> Self {
		Self {
			by_name: IndexMap::default(),
			table: AggregationTable::new(),
			activated: false,
		}
	}

	/// Stores an enhancement under its lower-cased name.
	///
	/// A later registration with the same name replaces the earlier one and
	/// keeps its position in [`all`](Self::all). Active variants are also
	/// subscribed to their event's bucket. Overriding a name also withdraws the
	/// earlier behavior from dispatch; an active replacement on the same event
	/// takes over its bucket position.
	pub fn register(&mut self, def: EnhancementDef) -> Result<Registration, RegistryError> {
		if self.activated {
			warn!(enhancement = def.name(), "registration after activation rejected");
			return Err(RegistryError::Sealed {
				operation: "register",
			});
		}
		if def.name() == EMPTY_SENTINEL {
			return Err(RegistryError::ReservedName);
		}

		let (enhancement, subscription) = def.into_parts();
		let key: Box<str> = normalize_name(enhancement.name()).into();

		let withdrawn = if self.by_name.contains_key(&key) {
			self.table.withdraw(&key)?
		} else {
			None
		};

		let subscription = match subscription {
			Some((kind, subscribe)) => {
				debug!(enhancement = &*key, event = kind.name(), "registering active enhancement");
				let at = withdrawn.filter(|(from, _)| *from == kind).map(|(_, index)| index);
				Some(subscribe(&mut self.table, at)?)
			}
			None => {
				debug!(enhancement = &*key, "registering passive enhancement");
				None
			}
		};
		if withdrawn.is_some() {
			self.table.prune_empty();
		}

		let action = match self.by_name.insert(key, enhancement) {
			Some(previous) => {
				warn!(enhancement = previous.name(), "enhancement overridden by later registration");
				InsertAction::ReplacedExisting
			}
			None => InsertAction::InsertedNew,
		};

		Ok(Registration {
			action,
			subscription,
		})
	}

	/// Subscribes a behavior to `E` without registering it by name.
	pub fn subscribe<E, T>(&mut self, behavior: Arc<T>) -> Result<SubscribeAction, RegistryError>
	where
		E: Event,
		T: Triggered<E>,
	{
		if self.activated {
			return Err(RegistryError::Sealed {
				operation: "subscribe",
			});
		}
		self.table.subscribe::<E, T>(behavior)
	}

	/// Resolves `name` (case-insensitively), falling back to the empty slot.
	pub fn lookup(&self, name: &str) -> &dyn Enhancement {
		self.get(name).unwrap_or(&EMPTY_SLOT)
	}

	/// Resolves `name`, distinguishing empty slots from unknown names.
	pub fn resolve<'a>(&'a self, name: &'a str) -> Resolution<'a> {
		if name == EMPTY_SENTINEL {
			return Resolution::Empty;
		}
		match self.get(name) {
			Some(e) => Resolution::Registered(e),
			None => Resolution::Orphaned(name),
		}
	}

	/// Strict lookup: `None` for unknown names and for the empty sentinel.
	pub fn get(&self, name: &str) -> Option<&dyn Enhancement> {
		if name == EMPTY_SENTINEL {
			return None;
		}
		self.by_name.get(&*normalize_name(name)).map(|e| &**e)
	}

	/// Shared handle to a registered enhancement.
	pub fn get_shared(&self, name: &str) -> Option<Arc<dyn Enhancement>> {
		self.by_name.get(&*normalize_name(name)).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Every registered enhancement in registration order. The empty slot is never included.
	pub fn all(&self) -> impl Iterator<Item = &dyn Enhancement> + '_ {
		self.by_name.values().map(|e| &**e)
	}

	pub fn empty_slot(&self) -> &dyn Enhancement {
		&EMPTY_SLOT
	}

	/// Installs one handler per bucket with `host`.
	///
	/// Must be called once, after every registration. A second call fails
	/// without installing anything.
	pub fn activate(&mut self, host: &mut dyn EventHost) -> Result<usize, RegistryError> {
		if self.activated {
			warn!("registry activation attempted twice");
			return Err(RegistryError::AlreadyActivated);
		}

		let handles = self.table.seal()?;
		let installed = handles.len();
		for (kind, handler) in handles {
			debug!(event = kind.name(), behaviors = handler.len(), "installing bucket");
			host.install(kind, handler);
		}

		self.activated = true;
		info!(
			enhancements = self.by_name.len(),
			buckets = installed,
			"enhancement registry activated"
		);
		Ok(installed)
	}

	pub fn is_activated(&self) -> bool {
		self.activated
	}

	/// Event kinds that have at least one active enhancement.
	pub fn event_kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
		self.table.kinds()
	}

	pub fn bucket<E: Event>(&self) -> Option<&AggregationBucket<E>> {
		self.table.get::<E>()
	}

	pub fn buckets(&self) -> impl Iterator<Item = &dyn BucketHandler> {
		self.table.handlers()
	}

	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}
}
