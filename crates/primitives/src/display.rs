use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Named colors available to display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
	#[default]
	Plain,
	Gray,
	DarkGray,
	Green,
	Aqua,
	Blue,
	LightPurple,
	Gold,
	Red,
	Yellow,
}

bitflags! {
	/// Text decorations layered on top of a [`Tone`].
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
	pub struct Modifier: u8 {
		const BOLD = 1 << 0;
		const ITALIC = 1 << 1;
		const UNDERLINED = 1 << 2;
		const STRIKETHROUGH = 1 << 3;
	}
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
	pub text: String,
	#[serde(default)]
	pub tone: Tone,
	#[serde(default, skip_serializing_if = "Modifier::is_empty")]
	pub modifiers: Modifier,
}

impl Span {
	pub fn new(text: impl Into<String>, tone: Tone) -> Self {
		Self {
			text: text.into(),
			tone,
			modifiers: Modifier::empty(),
		}
	}

	pub fn with_modifiers(mut self, modifiers: Modifier) -> Self {
		self.modifiers |= modifiers;
		self
	}
}

/// One line of an item's human-readable description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayLine {
	spans: Vec<Span>,
}

impl DisplayLine {
	pub fn new() -> Self {
		Self::default()
	}

	/// A line consisting of a single unstyled span.
	pub fn plain(text: impl Into<String>) -> Self {
		Self::styled(text, Tone::Plain)
	}

	/// A line consisting of a single span in `tone`.
	pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
		Self {
			spans: vec![Span::new(text, tone)],
		}
	}

	pub fn push(mut self, span: Span) -> Self {
		self.spans.push(span);
		self
	}

	pub fn spans(&self) -> &[Span] {
		&self.spans
	}

	/// The line's text with all styling stripped.
	pub fn to_plain(&self) -> String {
		self.spans.iter().map(|s| s.text.as_str()).collect()
	}
}

impl From<Span> for DisplayLine {
	fn from(span: Span) -> Self {
		Self { spans: vec![span] }
	}
}

impl std::fmt::Display for DisplayLine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for span in &self.spans {
			f.write_str(&span.text)?;
		}
		Ok(())
	}
}
