use thiserror::Error;

/// Errors returned by registry mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// Structural change attempted after [`activate`](crate::EnhancementRegistry::activate).
	#[error("registry is sealed: cannot {operation} after activation")]
	Sealed { operation: &'static str },

	/// [`activate`](crate::EnhancementRegistry::activate) called a second time.
	#[error("registry already activated")]
	AlreadyActivated,

	/// The empty name is reserved for the empty-slot sentinel.
	#[error("the empty name is reserved for the empty slot")]
	ReservedName,

	/// A bucket exists for the event kind but holds a different event type.
	#[error("aggregation bucket for {event} has an unexpected type")]
	KindMismatch { event: &'static str },
}
