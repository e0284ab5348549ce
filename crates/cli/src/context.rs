use anyhow::Context as _;
use socketry_content::register_builtins;
use socketry_registry::{EnhancementRegistry, EventBus};
use socketry_sockets::{CapacityTable, SlotCodec, SocketContext, SocketryConfig};
use tracing::info;

/// Process-wide state: built once in `main`, borrowed by every command.
pub struct Context {
	pub registry: EnhancementRegistry,
	pub bus: EventBus,
	pub codec: SlotCodec,
	pub capacities: CapacityTable,
}

impl Context {
	/// Registers the built-ins and activates the registry on a fresh bus.
	pub fn new(config: &SocketryConfig) -> anyhow::Result<Self> {
		let codec = config.sockets.codec();
		let mut registry = EnhancementRegistry::new();
		register_builtins(&mut registry, &codec).context("failed to register built-in enhancements")?;

		let mut bus = EventBus::new();
		registry
			.activate(&mut bus)
			.context("failed to activate enhancement registry")?;
		info!(key = %codec.key(), enhancements = registry.len(), "context ready");

		Ok(Self {
			registry,
			bus,
			codec,
			capacities: config.sockets.capacities(),
		})
	}

	pub fn sockets(&self) -> SocketContext<'_> {
		SocketContext::new(&self.registry, &self.codec, &self.capacities)
	}
}
