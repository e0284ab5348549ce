use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};

/// Most sockets one `add-slots` call may add, forced or not.
pub const MAX_ADDED_SLOTS: u64 = 64;

#[derive(Parser, Debug)]
#[command(name = "socketry")]
#[command(about = "Inspect and edit socketed items")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (TOML)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands. `ITEM` is always a JSON item file.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Create a new item file
	New {
		item: PathBuf,
		kind: String,
		/// Sockets to add, up to the kind's capacity
		#[arg(long, default_value_t = 0)]
		slots: usize,
	},
	/// List registered enhancements and the events they react to
	List,
	/// Show an item's sockets
	Inspect { item: PathBuf },
	/// Bind an enhancement to the lowest empty socket
	Bind { item: PathBuf, name: String },
	/// Empty the socket holding an enhancement
	Remove { item: PathBuf, name: String },
	/// Remove the last enhancement of the leading filled sockets
	Pop { item: PathBuf },
	/// Add empty sockets
	AddSlots {
		item: PathBuf,
		#[arg(value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_ADDED_SLOTS))]
		count: usize,
		/// Ignore the kind's capacity
		#[arg(long)]
		force: bool,
	},
	/// Bind a random applicable enhancement, weighted by rarity
	Roll {
		item: PathBuf,
		/// Seed for a reproducible draw
		#[arg(long)]
		seed: Option<u64>,
	},
	/// Publish an event carrying the item and print the dispatch report
	Simulate { item: PathBuf, event: SimulatedEvent },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulatedEvent {
	/// Break a block with the item
	BlockBreak,
	/// Land a lethal hit on a zombie
	EntityDamage,
	/// Right-click with the item
	PlayerInteract,
}
