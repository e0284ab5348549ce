//! Built-in enhancements.

mod blink;
mod capturing;
mod explosive;
mod glowing;

pub use blink::Blink;
pub use capturing::Capturing;
pub use explosive::Explosive;
pub use glowing::Glowing;
use socketry_primitives::{DisplayLine, Modifier, Rarity, Span, Tone};
use socketry_registry::{EnhancementDef, EnhancementRegistry, Registration, RegistryError};
use socketry_sockets::SlotCodec;
use tracing::debug;

/// Definitions for every built-in, in registration order.
///
/// Active enhancements read sockets through `codec`, so it must match the
/// codec the host uses for its items.
pub fn definitions(codec: &SlotCodec) -> Vec<EnhancementDef> {
	vec![
		EnhancementDef::active::<crate::events::BlockBreak, _>(Explosive::new(codec.clone())),
		EnhancementDef::active::<crate::events::EntityDamage, _>(Capturing::new(codec.clone())),
		EnhancementDef::active::<crate::events::PlayerInteract, _>(Blink::new(codec.clone())),
		EnhancementDef::passive(Glowing),
	]
}

/// Registers every built-in with `registry`.
pub fn register_builtins(
	registry: &mut EnhancementRegistry,
	codec: &SlotCodec,
) -> Result<Vec<Registration>, RegistryError> {
	let registrations = definitions(codec)
		.into_iter()
		.map(|def| registry.register(def))
		.collect::<Result<Vec<_>, _>>()?;
	debug!(count = registrations.len(), "built-in enhancements registered");
	Ok(registrations)
}

/// Socket line shared by the built-ins: bold name in the rarity's tone, then the tier.
fn socket_line(label: &str, rarity: Rarity) -> DisplayLine {
	DisplayLine::new()
		.push(Span::new(label, rarity.tone()).with_modifiers(Modifier::BOLD))
		.push(Span::new(format!(" ({rarity})"), Tone::DarkGray))
}

#[cfg(test)]
mod tests {
	use socketry_registry::InsertAction;

	use super::*;

	#[test]
	fn test_register_builtins() {
		let mut registry = EnhancementRegistry::new();
		let registrations = register_builtins(&mut registry, &SlotCodec::default()).unwrap();

		assert!(
			registrations
				.iter()
				.all(|r| r.action == InsertAction::InsertedNew)
		);
		let names: Vec<_> = registry.all().map(|e| e.name()).collect();
		assert_eq!(names, ["explosive", "capturing", "blink", "glowing"]);
		assert_eq!(registry.event_kinds().count(), 3);
	}

	#[test]
	fn test_socket_line_text() {
		assert_eq!(
			socket_line("Explosive", Rarity::Rare).to_plain(),
			"Explosive (rare)"
		);
	}
}
