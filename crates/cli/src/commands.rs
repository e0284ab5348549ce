use std::io::Write;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use socketry_content::{
	BlockBreak, BlockPos, EntityDamage, Interaction, PlayerInteract, Target, Vec3,
};
use socketry_primitives::ItemRecord;
use socketry_registry::{DispatchReport, Event, Resolution, Verdict};
use socketry_sockets::{Popped, SlotError, SlotState};

use crate::cli::{Command, SimulatedEvent};
use crate::context::Context;
use crate::item_file;

/// How a command ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
	Done,
	/// The requested change was refused; nothing was written.
	Rejected,
}

pub fn run(ctx: &Context, command: Command, out: &mut dyn Write) -> anyhow::Result<Status> {
	match command {
		Command::New { item, kind, slots } => new_item(ctx, &item, &kind, slots, out),
		Command::List => list(ctx, out),
		Command::Inspect { item } => {
			let state = ctx.sockets().open(item_file::load(&item)?)?;
			inspect(&state, out)?;
			Ok(Status::Done)
		}
		Command::Bind { item, name } => edit(ctx, &item, out, |state| {
			let Some(enhancement) = state.registry().get(&name) else {
				return Err(format!("unknown enhancement {name:?}"));
			};
			state
				.try_bind(enhancement)
				.map(|slot| format!("bound {} to socket {slot}", enhancement.name()))
				.map_err(|e| e.to_string())
		}),
		Command::Remove { item, name } => edit(ctx, &item, out, |state| {
			state
				.try_remove(&name)
				.map(|slot| format!("emptied socket {slot}"))
				.map_err(|e| e.to_string())
		}),
		Command::Pop { item } => edit(ctx, &item, out, |state| match state.pop_entry() {
			Some(Popped::Registered(e)) => Ok(format!("popped {}", e.name())),
			Some(Popped::Orphaned(name)) => Ok(format!("popped {name} (unregistered)")),
			None => Err("nothing to pop".to_string()),
		}),
		Command::AddSlots { item, count, force } => edit(ctx, &item, out, |state| {
			if force {
				state.add_slots(count);
			} else {
				state.try_add_slots(count).map_err(|e| e.to_string())?;
			}
			Ok(format!(
				"item now has {}/{} sockets",
				state.occupancy(),
				state.capacity()
			))
		}),
		Command::Roll { item, seed } => {
			let mut rng = match seed {
				Some(seed) => StdRng::seed_from_u64(seed),
				None => StdRng::from_os_rng(),
			};
			edit(ctx, &item, out, |state| {
				let Some(pick) = state.random_applicable(&mut rng) else {
					return Err("no applicable enhancement".to_string());
				};
				state
					.try_bind(pick)
					.map(|slot| format!("rolled {} ({}) into socket {slot}", pick.name(), pick.rarity()))
					.map_err(|e: SlotError| e.to_string())
			})
		}
		Command::Simulate { item, event } => {
			simulate(ctx, item_file::load(&item)?, event, out)?;
			Ok(Status::Done)
		}
	}
}

fn new_item(
	ctx: &Context,
	path: &Path,
	kind: &str,
	slots: usize,
	out: &mut dyn Write,
) -> anyhow::Result<Status> {
	let mut state = ctx.sockets().open(ItemRecord::new(kind))?;
	if let Err(err) = state.try_add_slots(slots) {
		writeln!(out, "rejected: {err}")?;
		return Ok(Status::Rejected);
	}
	let item = state.commit();
	item_file::create(path, &item)?;
	writeln!(out, "created {} with {slots} sockets", item.kind)?;
	Ok(Status::Done)
}

/// Loads an item, applies `op` and saves it only if `op` succeeded.
fn edit<F>(ctx: &Context, path: &Path, out: &mut dyn Write, op: F) -> anyhow::Result<Status>
where
	F: FnOnce(&mut SlotState<'_, ItemRecord>) -> Result<String, String>,
{
	let mut state = ctx.sockets().open(item_file::load(path)?)?;
	match op(&mut state) {
		Ok(message) => {
			writeln!(out, "{message}")?;
			item_file::save(path, &state.commit())?;
			Ok(Status::Done)
		}
		Err(reason) => {
			writeln!(out, "rejected: {reason}")?;
			Ok(Status::Rejected)
		}
	}
}

fn list(ctx: &Context, out: &mut dyn Write) -> anyhow::Result<Status> {
	for e in ctx.registry.all() {
		writeln!(out, "{:<12} {:<10} {}", e.name(), e.rarity().label(), e.display().to_plain())?;
	}
	writeln!(out, "events:")?;
	for bucket in ctx.registry.buckets() {
		writeln!(out, "  {:<16} {} behavior(s)", bucket.kind().name(), bucket.len())?;
	}
	Ok(Status::Done)
}

fn inspect(state: &SlotState<'_, ItemRecord>, out: &mut dyn Write) -> anyhow::Result<()> {
	writeln!(
		out,
		"{}: {}/{} sockets, {} filled",
		state.item().kind,
		state.occupancy(),
		state.capacity(),
		state.filled()
	)?;
	for (i, slot) in state.resolved().enumerate() {
		match slot {
			Resolution::Empty => writeln!(out, "  [{i}] <empty>")?,
			Resolution::Registered(e) => writeln!(out, "  [{i}] {} ({})", e.name(), e.rarity())?,
			Resolution::Orphaned(name) => writeln!(out, "  [{i}] {name} (unregistered)")?,
		}
	}
	Ok(())
}

fn simulate(
	ctx: &Context,
	item: ItemRecord,
	event: SimulatedEvent,
	out: &mut dyn Write,
) -> anyhow::Result<()> {
	match event {
		SimulatedEvent::BlockBreak => publish(
			ctx,
			BlockBreak::new("simulator", item, BlockPos::new(0, 64, 0)),
			out,
		),
		SimulatedEvent::EntityDamage => publish(
			ctx,
			EntityDamage {
				attacker: "simulator".into(),
				weapon: item,
				target: Target {
					kind: "ZOMBIE".into(),
					health: 20.0,
					is_player: false,
				},
				damage: 20.0,
				captured: None,
			},
			out,
		),
		SimulatedEvent::PlayerInteract => publish(
			ctx,
			PlayerInteract {
				player: "simulator".into(),
				item,
				action: Interaction::RightClickAir,
				position: Vec3::new(0.0, 64.0, 0.0),
				facing: Vec3::new(0.0, 0.0, 1.0),
				teleport: None,
			},
			out,
		),
	}
}

fn publish<E: Event + Serialize>(
	ctx: &Context,
	mut event: E,
	out: &mut dyn Write,
) -> anyhow::Result<()> {
	let report = ctx.bus.publish(&mut event);
	write_report(&report, out)?;
	writeln!(out, "{}", serde_json::to_string_pretty(&event)?)?;
	Ok(())
}

fn write_report(report: &DispatchReport, out: &mut dyn Write) -> anyhow::Result<()> {
	writeln!(out, "{}: {} evaluated", report.event().name(), report.evaluated())?;
	for (name, verdict) in report.verdicts() {
		let verdict = match verdict {
			Verdict::Skipped => "skipped".to_string(),
			Verdict::Fired => "fired".to_string(),
			Verdict::CancelRequested => "fired, cancel requested".to_string(),
			Verdict::Failed(reason) => format!("failed: {reason}"),
			Verdict::Faulted(reason) => format!("panicked: {reason}"),
		};
		writeln!(out, "  {name}: {verdict}")?;
	}
	if report.cancel_requested() {
		writeln!(out, "event cancelled")?;
	}
	Ok(())
}
