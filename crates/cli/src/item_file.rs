//! JSON item files.

use std::path::Path;

use anyhow::{Context, bail};
use socketry_primitives::ItemRecord;
use tracing::debug;

pub fn load(path: &Path) -> anyhow::Result<ItemRecord> {
	let text = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read item file {}", path.display()))?;
	serde_json::from_str(&text).with_context(|| format!("invalid item file {}", path.display()))
}

pub fn save(path: &Path, item: &ItemRecord) -> anyhow::Result<()> {
	let mut text = serde_json::to_string_pretty(item)?;
	text.push('\n');
	std::fs::write(path, text)
		.with_context(|| format!("failed to write item file {}", path.display()))?;
	debug!(path = %path.display(), kind = %item.kind, "item saved");
	Ok(())
}

/// Like [`save`], but refuses to overwrite an existing file.
pub fn create(path: &Path, item: &ItemRecord) -> anyhow::Result<()> {
	if path.exists() {
		bail!("{} already exists", path.display());
	}
	save(path, item)
}
