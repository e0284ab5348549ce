//! Enhancement registry and event dispatch.
//!
//! Enhancements are named behaviors that can be bound to item sockets. The
//! [`EnhancementRegistry`] owns every enhancement and, for the active ones,
//! groups them into one [`AggregationBucket`] per event type. Activation
//! installs each bucket with the host's event system exactly once; from then
//! on an event of type `E` reaches a single handler that runs every behavior
//! subscribed to `E` in registration order.
//!
//! ```ignore
//! let mut registry = EnhancementRegistry::new();
//! registry.register(EnhancementDef::passive(Glowing))?;
//! registry.register(EnhancementDef::active::<BlockBreak, _>(Explosive::new(codec)))?;
//!
//! let mut bus = EventBus::new();
//! registry.activate(&mut bus)?;
//!
//! let report = bus.publish(&mut BlockBreak::new("steve", pickaxe, origin));
//! ```

mod aggregation;
mod enhancement;
mod error;
mod event;
mod host;
mod registry;

pub use aggregation::{
	AggregationBucket, AggregationTable, BucketHandler, BucketState, DispatchReport,
	SubscribeAction, Verdict,
};
pub use enhancement::{
	Candidate, EMPTY_SENTINEL, EMPTY_SLOT, EffectError, EmptySlot, Enhancement, EnhancementDef,
	Outcome, Triggered, normalize_name,
};
pub use error::RegistryError;
pub use event::{Event, EventKind};
pub use host::{EventBus, EventHost};
pub use registry::{EnhancementRegistry, InsertAction, Registration, Resolution};
