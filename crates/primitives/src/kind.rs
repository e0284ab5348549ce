use serde::{Deserialize, Serialize};

/// Identifier of an item's material/kind, e.g. `PICKAXE`.
///
/// Kinds compare case-insensitively: the stored form is always upper case with
/// spaces and dashes folded to underscores, so `"diamond-sword"` and
/// `"DIAMOND_SWORD"` name the same kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ItemKind(Box<str>);

impl ItemKind {
	pub fn new(name: impl AsRef<str>) -> Self {
		let normalized: String = name
			.as_ref()
			.trim()
			.chars()
			.map(|c| match c {
				' ' | '-' => '_',
				c => c.to_ascii_uppercase(),
			})
			.collect();
		Self(normalized.into_boxed_str())
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for ItemKind {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for ItemKind {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<ItemKind> for String {
	fn from(value: ItemKind) -> Self {
		value.0.into_string()
	}
}

impl std::fmt::Display for ItemKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}
