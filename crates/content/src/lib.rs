//! Reference content: a handful of enhancements and the game events they
//! react to.
//!
//! Effects only record what should happen on the event (blocks to break, a
//! teleport target, a captured creature); carrying them out is up to the host.

pub mod builtins;
pub mod events;
pub mod tool;

pub use builtins::{Blink, Capturing, Explosive, Glowing, register_builtins};
pub use events::{BlockBreak, BlockPos, EntityDamage, Interaction, PlayerInteract, Target, Vec3};
pub use tool::ToolClass;
