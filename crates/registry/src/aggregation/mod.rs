//! Per-event-type aggregation of active enhancements.
//!
//! Every event type gets one [`AggregationBucket`], created on first
//! subscription. A bucket is the single delivery point for its type: the host
//! hands it an event and the bucket runs every subscribed behavior in
//! registration order.
//!
//! # Fault isolation
//!
//! Behaviors are independent plug-ins. A false trigger skips the behavior, an
//! effect error is logged, and a panic in either method is caught and logged;
//! in every case dispatch moves on to the next behavior.

mod report;

use std::any::{Any, TypeId};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use indexmap::IndexMap;
pub use report::{DispatchReport, Verdict};
use rustc_hash::FxBuildHasher;
use tracing::{debug, error, trace, warn};

use crate::enhancement::{Outcome, Triggered, normalize_name};
use crate::error::RegistryError;
use crate::event::{Event, EventKind};

/// Result of subscribing a behavior to a bucket.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SubscribeAction {
	/// Behavior appended to the bucket.
	Added,
	/// A behavior of the same concrete type was already present; nothing changed.
	KeptExisting,
}

/// Lifecycle of a bucket. There is no teardown.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BucketState {
	Empty,
	Populated,
	Installed,
}

struct BucketEntry<E: Event> {
	behavior_type: TypeId,
	type_name: &'static str,
	behavior: Arc<dyn Triggered<E>>,
}

/// Ordered, type-deduplicated list of behaviors reacting to events of type `E`.
pub struct AggregationBucket<E: Event> {
	entries: Vec<BucketEntry<E>>,
	installed: bool,
}

impl<E: Event> Default for AggregationBucket<E> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
			installed: false,
		}
	}
}

impl<E: Event> AggregationBucket<E> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `behavior` unless one of the same concrete type `T` is present.
	pub fn push<T: Triggered<E>>(&mut self, behavior: Arc<T>) -> SubscribeAction {
		self.insert(behavior, None)
	}

	/// [`push`](Self::push), placing the behavior at `at` (clamped) instead of the end.
	pub(crate) fn insert<T: Triggered<E>>(
		&mut self,
		behavior: Arc<T>,
		at: Option<usize>,
	) -> SubscribeAction {
		let behavior_type = TypeId::of::<T>();
		if let Some(existing) = self
			.entries
			.iter()
			.find(|e| e.behavior_type == behavior_type)
		{
			debug!(
				event = E::NAME,
				behavior = existing.type_name,
				kept = existing.behavior.name(),
				skipped = behavior.name(),
				"behavior type already subscribed"
			);
			return SubscribeAction::KeptExisting;
		}

		let index = at.map_or(self.entries.len(), |at| at.min(self.entries.len()));
		trace!(event = E::NAME, enhancement = behavior.name(), position = index, "subscribed");
		self.entries.insert(
			index,
			BucketEntry {
				behavior_type,
				type_name: std::any::type_name::<T>(),
				behavior,
			},
		);
		SubscribeAction::Added
	}

	/// Drops every behavior whose name normalizes to `name`. Yields the first removed position.
	pub(crate) fn withdraw(&mut self, name: &str) -> Option<usize> {
		let first = self
			.entries
			.iter()
			.position(|e| normalize_name(e.behavior.name()) == name)?;
		self.entries.retain(|e| normalize_name(e.behavior.name()) != name);
		debug!(event = E::NAME, enhancement = name, position = first, "behavior withdrawn");
		Some(first)
	}

	/// Runs every subscribed behavior against `event`, in registration order.
	pub fn dispatch(&self, event: &mut E) -> DispatchReport {
		let mut report = DispatchReport::new(EventKind::of::<E>());

		for entry in &self.entries {
			let name = entry.behavior.name();

			let triggered =
				match panic::catch_unwind(AssertUnwindSafe(|| entry.behavior.trigger(event))) {
					Ok(triggered) => triggered,
					Err(payload) => {
						let msg = panic_message(&*payload);
						error!(event = E::NAME, enhancement = name, panic = msg, "trigger panicked");
						report.record(name, Verdict::Faulted(msg.to_string()));
						continue;
					}
				};

			if !triggered {
				report.record(name, Verdict::Skipped);
				continue;
			}

			let verdict = match panic::catch_unwind(AssertUnwindSafe(|| entry.behavior.effect(event)))
			{
				Ok(Ok(Outcome::Continue)) => Verdict::Fired,
				Ok(Ok(Outcome::Cancel)) => Verdict::CancelRequested,
				Ok(Err(err)) => {
					warn!(event = E::NAME, enhancement = name, error = %err, "effect failed");
					Verdict::Failed(err.to_string())
				}
				Err(payload) => {
					let msg = panic_message(&*payload);
					error!(event = E::NAME, enhancement = name, panic = msg, "effect panicked");
					Verdict::Faulted(msg.to_string())
				}
			};
			report.record(name, verdict);
		}

		report
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn state(&self) -> BucketState {
		if self.installed {
			BucketState::Installed
		} else if self.entries.is_empty() {
			BucketState::Empty
		} else {
			BucketState::Populated
		}
	}

	/// Names of the subscribed behaviors in dispatch order.
	pub fn behavior_names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|e| e.behavior.name())
	}
}

/// Type-erased view of an [`AggregationBucket`], as handed to the host.
pub trait BucketHandler: Send + Sync + 'static {
	fn kind(&self) -> EventKind;

	fn len(&self) -> usize;

	fn state(&self) -> BucketState;

	/// Delivers `event` if it is of this bucket's type; `None` otherwise.
	fn deliver(&self, event: &mut dyn Any) -> Option<DispatchReport>;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;

	#[doc(hidden)]
	fn mark_installed(&mut self);

	/// Removes behaviors registered under `name`; see [`AggregationBucket::withdraw`].
	#[doc(hidden)]
	fn withdraw(&mut self, name: &str) -> Option<usize>;
}

impl<E: Event> BucketHandler for AggregationBucket<E> {
	fn kind(&self) -> EventKind {
		EventKind::of::<E>()
	}

	fn len(&self) -> usize {
		self.entries.len()
	}

	fn state(&self) -> BucketState {
		AggregationBucket::state(self)
	}

	fn deliver(&self, event: &mut dyn Any) -> Option<DispatchReport> {
		event.downcast_mut::<E>().map(|event| self.dispatch(event))
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn mark_installed(&mut self) {
		self.installed = true;
	}

	fn withdraw(&mut self, name: &str) -> Option<usize> {
		AggregationBucket::withdraw(self, name)
	}
}

/// All buckets, keyed by event kind in creation order.
#[derive(Default)]
pub struct AggregationTable {
	buckets: IndexMap<EventKind, Arc<dyn BucketHandler>, FxBuildHasher>,
}

impl AggregationTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Finds or creates the bucket for `E` and appends `behavior` to it.
	///
	/// Fails with [`RegistryError::Sealed`] once the bucket has been handed to a host.
	pub fn subscribe<E, T>(&mut self, behavior: Arc<T>) -> Result<SubscribeAction, RegistryError>
	where
		E: Event,
		T: Triggered<E>,
	{
		self.subscribe_at::<E, T>(behavior, None)
	}

	/// [`subscribe`](Self::subscribe) at a given bucket position, used when a name is overridden.
	pub(crate) fn subscribe_at<E, T>(
		&mut self,
		behavior: Arc<T>,
		at: Option<usize>,
	) -> Result<SubscribeAction, RegistryError>
	where
		E: Event,
		T: Triggered<E>,
	{
		let kind = EventKind::of::<E>();
		let slot = self.buckets.entry(kind).or_insert_with(|| {
			debug!(event = kind.name(), "creating aggregation bucket");
			Arc::new(AggregationBucket::<E>::new()) as Arc<dyn BucketHandler>
		});

		let handler = Arc::get_mut(slot).ok_or(RegistryError::Sealed {
			operation: "subscribe",
		})?;
		let bucket = handler
			.as_any_mut()
			.downcast_mut::<AggregationBucket<E>>()
			.ok_or(RegistryError::KindMismatch { event: kind.name() })?;
		Ok(bucket.insert(behavior, at))
	}

	/// Removes the behaviors registered under `name` from every bucket.
	///
	/// Returns the bucket and position of the first one removed, so a
	/// replacement on the same event can take its place.
	pub(crate) fn withdraw(
		&mut self,
		name: &str,
	) -> Result<Option<(EventKind, usize)>, RegistryError> {
		let mut first = None;
		for (kind, slot) in &mut self.buckets {
			let handler = Arc::get_mut(slot).ok_or(RegistryError::Sealed {
				operation: "register",
			})?;
			if let Some(index) = handler.withdraw(name) {
				first.get_or_insert((*kind, index));
			}
		}
		Ok(first)
	}

	/// Drops buckets left without behaviors, keeping the order of the rest.
	pub(crate) fn prune_empty(&mut self) {
		self.buckets.retain(|kind, handler| {
			let keep = handler.len() > 0;
			if !keep {
				debug!(event = kind.name(), "dropping empty aggregation bucket");
			}
			keep
		});
	}

	pub fn get<E: Event>(&self) -> Option<&AggregationBucket<E>> {
		self.buckets
			.get(&EventKind::of::<E>())
			.and_then(|h| h.as_any().downcast_ref())
	}

	/// Distinct event kinds with a bucket, in creation order.
	pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
		self.buckets.keys().copied()
	}

	pub fn handlers(&self) -> impl Iterator<Item = &dyn BucketHandler> {
		self.buckets.values().map(|h| &**h)
	}

	/// Marks every bucket installed and returns shared handles for the host.
	///
	/// After this the table holds shared references, so further subscriptions fail.
	pub(crate) fn seal(&mut self) -> Result<Vec<(EventKind, Arc<dyn BucketHandler>)>, RegistryError> {
		let mut sealed = Vec::with_capacity(self.buckets.len());
		for (kind, slot) in &mut self.buckets {
			Arc::get_mut(slot)
				.ok_or(RegistryError::Sealed {
					operation: "activate",
				})?
				.mark_installed();
			sealed.push((*kind, Arc::clone(slot)));
		}
		Ok(sealed)
	}

	pub fn len(&self) -> usize {
		self.buckets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
	payload
		.downcast_ref::<&'static str>()
		.copied()
		.or_else(|| payload.downcast_ref::<String>().map(String::as_str))
		.unwrap_or("non-string panic payload")
}
