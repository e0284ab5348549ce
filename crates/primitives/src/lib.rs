//! Core types for socketed items: kinds, attribute stores, display lines and rarity.

/// Namespaced attribute keys and values.
pub mod attribute;
/// Styled, human-readable display lines.
pub mod display;
/// The item record abstraction and its bundled implementation.
pub mod item;
/// Item kind identifiers.
pub mod kind;
/// Rarity tiers used for weighted selection.
pub mod rarity;

pub use attribute::{AttributeStore, AttributeValue, KeyError, NamespacedKey};
pub use display::{DisplayLine, Modifier, Span, Tone};
pub use item::{ItemData, ItemRecord};
pub use kind::ItemKind;
pub use rarity::Rarity;
