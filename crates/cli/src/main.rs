//! `socketry` binary.
//!
//! Builds the single long-lived [`Context`](context::Context) (registry,
//! event bus, codec and capacities), then runs one subcommand against a JSON
//! item file.

mod cli;
mod commands;
mod context;
mod item_file;

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use socketry_sockets::SocketryConfig;

use crate::cli::Cli;
use crate::commands::Status;
use crate::context::Context;

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => SocketryConfig::load(path)
			.with_context(|| format!("failed to load configuration from {}", path.display()))?,
		None => SocketryConfig::default(),
	};
	let ctx = Context::new(&config)?;

	let mut stdout = std::io::stdout().lock();
	match commands::run(&ctx, cli.command, &mut stdout)? {
		Status::Done => Ok(ExitCode::SUCCESS),
		Status::Rejected => Ok(ExitCode::from(2)),
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("SOCKETRY_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("socketry=debug,info")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
