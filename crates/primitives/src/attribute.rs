use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a [`NamespacedKey`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
	/// The input had no `namespace:` prefix.
	#[error("missing namespace in key {0:?}")]
	MissingNamespace(String),
	/// Namespace or key was empty.
	#[error("empty component in key {0:?}")]
	EmptyComponent(String),
	/// A character outside `[a-z0-9._-]` (plus `/` in the key part).
	#[error("invalid character {ch:?} in key {key:?}")]
	InvalidChar { key: String, ch: char },
}

/// A `namespace:key` pair addressing one field of an item's attribute store.
///
/// Both halves are lower case. The namespace may contain `[a-z0-9._-]`, the key
/// additionally allows `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespacedKey {
	namespace: Box<str>,
	key: Box<str>,
}

impl NamespacedKey {
	/// Builds a key from its two halves, validating both.
	pub fn new(namespace: &str, key: &str) -> Result<Self, KeyError> {
		Self::parse(&format!("{namespace}:{key}"))
	}

	/// Builds a key from compile-time constants without validation.
	///
	/// Both halves must already satisfy the rules enforced by [`parse`](Self::parse).
	pub fn from_static(namespace: &'static str, key: &'static str) -> Self {
		debug_assert!(
			Self::new(namespace, key).is_ok(),
			"invalid static key {namespace}:{key}"
		);
		Self {
			namespace: namespace.into(),
			key: key.into(),
		}
	}

	/// Parses `namespace:key`.
	pub fn parse(input: &str) -> Result<Self, KeyError> {
		let Some((namespace, key)) = input.split_once(':') else {
			return Err(KeyError::MissingNamespace(input.to_string()));
		};
		if namespace.is_empty() || key.is_empty() {
			return Err(KeyError::EmptyComponent(input.to_string()));
		}

		let allowed = |c: char, path: bool| {
			c.is_ascii_lowercase()
				|| c.is_ascii_digit()
				|| matches!(c, '.' | '_' | '-')
				|| (path && c == '/')
		};
		if let Some(ch) = namespace.chars().find(|&c| !allowed(c, false)) {
			return Err(KeyError::InvalidChar {
				key: input.to_string(),
				ch,
			});
		}
		if let Some(ch) = key.chars().find(|&c| !allowed(c, true)) {
			return Err(KeyError::InvalidChar {
				key: input.to_string(),
				ch,
			});
		}

		Ok(Self {
			namespace: namespace.into(),
			key: key.into(),
		})
	}

	#[inline]
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	#[inline]
	pub fn key(&self) -> &str {
		&self.key
	}
}

impl TryFrom<String> for NamespacedKey {
	type Error = KeyError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<NamespacedKey> for String {
	fn from(value: NamespacedKey) -> Self {
		value.to_string()
	}
}

impl std::fmt::Display for NamespacedKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.namespace, self.key)
	}
}

impl std::str::FromStr for NamespacedKey {
	type Err = KeyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// A value stored in an item's attribute store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
	Text(String),
	Integer(i64),
	TextList(Vec<String>),
}

impl AttributeValue {
	/// Short name of the variant, used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Text(_) => "text",
			Self::Integer(_) => "integer",
			Self::TextList(_) => "text_list",
		}
	}

	pub fn as_text_list(&self) -> Option<&[String]> {
		match self {
			Self::TextList(list) => Some(list),
			_ => None,
		}
	}
}

/// Ordered map of namespaced attributes attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeStore {
	entries: BTreeMap<NamespacedKey, AttributeValue>,
}

impl AttributeStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &NamespacedKey) -> Option<&AttributeValue> {
		self.entries.get(key)
	}

	/// Stores `value` under `key`, returning the previous value.
	pub fn set(&mut self, key: NamespacedKey, value: AttributeValue) -> Option<AttributeValue> {
		self.entries.insert(key, value)
	}

	pub fn remove(&mut self, key: &NamespacedKey) -> Option<AttributeValue> {
		self.entries.remove(key)
	}

	pub fn contains(&self, key: &NamespacedKey) -> bool {
		self.entries.contains_key(key)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&NamespacedKey, &AttributeValue)> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
