use std::path::PathBuf;

use socketry_primitives::NamespacedKey;
use thiserror::Error;

/// The slot field held something other than a list of names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
	#[error("attribute {key} holds a {found} value, expected a text list")]
	UnexpectedValue {
		key: NamespacedKey,
		found: &'static str,
	},
}

/// A slot operation that was refused. The slot list is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
	#[error("the empty slot cannot be bound")]
	EmptySentinel,
	#[error("{name} cannot be bound to this item")]
	NotApplicable { name: String },
	#[error("{name} is already bound")]
	AlreadyBound { name: String },
	#[error("no empty socket left")]
	NoEmptySlot,
	#[error("{name} is not bound")]
	NotBound { name: String },
	#[error("adding {requested} sockets to {occupancy} would exceed capacity {capacity}")]
	CapacityExceeded {
		requested: usize,
		occupancy: usize,
		capacity: usize,
	},
}

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid configuration: {0}")]
	Parse(#[from] toml::de::Error),
}
