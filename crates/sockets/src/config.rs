use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use socketry_primitives::{ItemKind, NamespacedKey};
use tracing::debug;

use crate::capacity::{CapacityTable, DEFAULT_CAPACITY};
use crate::codec::SlotCodec;
use crate::error::ConfigError;

/// Top-level configuration file.
///
/// ```toml
/// [sockets]
/// key = "socketry:sockets"
/// default = 1
///
/// [sockets.kinds]
/// PICKAXE = 3
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketryConfig {
	pub sockets: SocketConfig,
}

/// The `[sockets]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocketConfig {
	/// Attribute holding the slot list.
	pub key: NamespacedKey,
	/// Capacity for kinds not listed in `kinds`.
	pub default: usize,
	pub kinds: BTreeMap<ItemKind, usize>,
}

impl Default for SocketConfig {
	fn default() -> Self {
		Self {
			key: SlotCodec::default().key().clone(),
			default: DEFAULT_CAPACITY,
			kinds: BTreeMap::new(),
		}
	}
}

impl SocketConfig {
	pub fn codec(&self) -> SlotCodec {
		SlotCodec::new(self.key.clone())
	}

	pub fn capacities(&self) -> CapacityTable {
		CapacityTable {
			default: self.default,
			kinds: self.kinds.clone(),
		}
	}
}

impl SocketryConfig {
	pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml(&input)?;
		debug!(
			path = %path.display(),
			kinds = config.sockets.kinds.len(),
			"configuration loaded"
		);
		Ok(config)
	}
}
