//! Item sockets: the persisted slot list, per-kind capacities and the
//! transient [`SlotState`] view used to inspect and edit them.
//!
//! A slot list lives in one namespaced attribute of an item. [`SlotCodec`]
//! reads and writes it; [`SlotState`] wraps an item together with the
//! registry its names resolve against and enforces the list invariants:
//! names are unique, empty slots hold [`EMPTY_SENTINEL`], and binding never
//! grows the list.
//!
//! [`EMPTY_SENTINEL`]: socketry_registry::EMPTY_SENTINEL

mod capacity;
mod codec;
mod config;
mod error;
mod select;
mod state;

pub use capacity::{CapacityTable, DEFAULT_CAPACITY};
pub use codec::{DEFAULT_SLOT_KEY, SlotCodec, SlotList};
pub use config::{SocketConfig, SocketryConfig};
pub use error::{CodecError, ConfigError, SlotError};
pub use select::pick_weighted;
pub use state::{Popped, SocketContext, SlotState};
