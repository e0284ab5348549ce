use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use socketry_primitives::{AttributeValue, DisplayLine, ItemRecord, Rarity};
use socketry_registry::EnhancementDef;

use super::*;

const NAMES: [&str; 4] = ["explosive", "capturing", "blink", "glowing"];

/// Accepts every item.
struct Plain(&'static str, Rarity);

impl Enhancement for Plain {
	fn name(&self) -> &str {
		self.0
	}

	fn display(&self) -> DisplayLine {
		DisplayLine::plain(self.0)
	}

	fn rarity(&self) -> Rarity {
		self.1
	}

	fn is_valid(&self, _: &Candidate<'_>) -> bool {
		true
	}
}

/// Only accepts pickaxes.
struct Prospecting;

impl Enhancement for Prospecting {
	fn name(&self) -> &str {
		"prospecting"
	}

	fn display(&self) -> DisplayLine {
		DisplayLine::plain("Prospecting")
	}

	fn is_valid(&self, candidate: &Candidate<'_>) -> bool {
		candidate.item.kind().as_str() == "PICKAXE"
	}
}

struct Fixture {
	registry: EnhancementRegistry,
	codec: SlotCodec,
	capacities: CapacityTable,
}

impl Fixture {
	fn new() -> Self {
		let mut registry = EnhancementRegistry::new();
		for name in NAMES.into_iter().chain(["a", "b", "c"]) {
			registry
				.register(EnhancementDef::passive(Plain(name, Rarity::Common)))
				.unwrap();
		}
		registry
			.register(EnhancementDef::passive(Prospecting))
			.unwrap();
		Self {
			registry,
			codec: SlotCodec::default(),
			capacities: CapacityTable::new(1).with("PICKAXE", 3),
		}
	}

	fn ctx(&self) -> SocketContext<'_> {
		SocketContext::new(&self.registry, &self.codec, &self.capacities)
	}

	fn item(&self, kind: &str, slots: &[&str]) -> ItemRecord {
		let mut item = ItemRecord::new(kind);
		item.set_attribute(
			self.codec.key().clone(),
			AttributeValue::TextList(slots.iter().map(|s| s.to_string()).collect()),
		);
		item
	}

	fn enhancement(&self, name: &str) -> &dyn Enhancement {
		self.registry.get(name).unwrap()
	}
}

fn names<'s, I: ItemData>(state: &'s SlotState<'_, I>) -> Vec<&'s str> {
	state.slots().iter().map(String::as_str).collect()
}

#[test]
fn test_pickaxe_fills_lowest_empty_slots() {
	let fx = Fixture::new();
	let mut state = fx
		.ctx()
		.open(fx.item("PICKAXE", &["explosive", "", ""]))
		.unwrap();

	assert_eq!(state.capacity(), 3);
	assert_eq!(state.occupancy(), 3);
	assert!(state.has_empty_slot());

	assert!(state.bind(fx.enhancement("capturing")));
	assert_eq!(names(&state), vec!["explosive", "capturing", ""]);

	assert!(state.bind(fx.enhancement("blink")));
	assert_eq!(names(&state), vec!["explosive", "capturing", "blink"]);
	assert!(!state.has_empty_slot());

	assert!(!state.bind(fx.enhancement("glowing")));
	assert_eq!(names(&state), vec!["explosive", "capturing", "blink"]);
	assert_eq!(
		state.try_bind(fx.enhancement("glowing")),
		Err(SlotError::NoEmptySlot)
	);
}

#[test]
fn test_pop_takes_end_of_leading_run() {
	let fx = Fixture::new();
	let mut state = fx.ctx().open(fx.item("STICK", &["a", "b", "", "c"])).unwrap();

	assert_eq!(state.pop().name(), "b");
	assert_eq!(names(&state), vec!["a", "", "", "c"]);
	assert_eq!(state.pop().name(), "a");
	assert_eq!(names(&state), vec!["", "", "", "c"]);

	// Leading socket is empty: nothing to pop, "c" stays.
	assert!(state.pop().is_empty_slot());
	assert_eq!(names(&state), vec!["", "", "", "c"]);
}

#[test]
fn test_pop_without_sockets() {
	let fx = Fixture::new();
	let mut state = fx.ctx().open(ItemRecord::new("STICK")).unwrap();
	assert!(state.pop().is_empty_slot());
	assert_eq!(state.occupancy(), 0);
}

#[test]
fn test_pop_leaves_orphan_but_pop_entry_takes_it() {
	let fx = Fixture::new();
	let mut state = fx
		.ctx()
		.open(fx.item("PICKAXE", &["explosive", "ghost", ""]))
		.unwrap();

	// An empty-slot result means the list was not touched.
	assert!(state.pop().is_empty_slot());
	assert_eq!(names(&state), vec!["explosive", "ghost", ""]);

	let popped = state.pop_entry().unwrap();
	assert!(matches!(&popped, Popped::Orphaned(name) if name == "ghost"));
	assert_eq!(names(&state), vec!["explosive", "", ""]);

	assert!(matches!(
		state.pop_entry(),
		Some(Popped::Registered(e)) if e.name() == "explosive"
	));
	assert!(state.pop_entry().is_none());
	assert_eq!(names(&state), vec!["", "", ""]);
}

#[test]
fn test_add_slots_ignores_unreachable_counts() {
	let fx = Fixture::new();
	let mut state = fx.ctx().open(fx.item("PICKAXE", &["explosive"])).unwrap();
	state.add_slots(usize::MAX);
	assert_eq!(names(&state), vec!["explosive"]);
	assert_eq!(
		state.try_add_slots(usize::MAX),
		Err(SlotError::CapacityExceeded {
			requested: usize::MAX,
			occupancy: 1,
			capacity: 3,
		})
	);
}

#[test]
fn test_add_slots_ignores_capacity() {
	let fx = Fixture::new();
	let mut state = fx.ctx().open(ItemRecord::new("STICK")).unwrap();
	assert_eq!(state.capacity(), 1);

	state.add_slots(4);
	assert_eq!(state.occupancy(), 4);
	state.add_slots(0);
	assert_eq!(state.occupancy(), 4);
	state.add_slots(2);
	assert_eq!(state.occupancy(), 6);
	assert_eq!(state.filled(), 0);
}

#[test]
fn test_try_add_slots_is_guarded() {
	let fx = Fixture::new();
	let mut state = fx.ctx().open(fx.item("PICKAXE", &["explosive"])).unwrap();

	assert_eq!(
		state.try_add_slots(3),
		Err(SlotError::CapacityExceeded {
			requested: 3,
			occupancy: 1,
			capacity: 3,
		})
	);
	assert_eq!(state.occupancy(), 1);

	state.try_add_slots(2).unwrap();
	assert_eq!(names(&state), vec!["explosive", "", ""]);
	assert!(state.try_add_slots(1).is_err());
	state.try_add_slots(0).unwrap();
}

#[test]
fn test_bind_twice_is_rejected() {
	let fx = Fixture::new();
	let mut state = fx.ctx().open(fx.item("PICKAXE", &["", "", ""])).unwrap();

	assert!(state.bind(fx.enhancement("blink")));
	let before = state.slots().clone();
	assert_eq!(
		state.try_bind(fx.enhancement("blink")),
		Err(SlotError::AlreadyBound {
			name: "blink".into()
		})
	);
	assert_eq!(state.slots(), &before);
}

#[test]
fn test_bind_checks_validity_and_sentinel() {
	let fx = Fixture::new();
	let mut bow = fx.ctx().open(fx.item("BOW", &[""])).unwrap();
	assert_eq!(
		bow.try_bind(fx.enhancement("prospecting")),
		Err(SlotError::NotApplicable {
			name: "prospecting".into()
		})
	);
	assert_eq!(
		bow.try_bind(fx.registry.empty_slot()),
		Err(SlotError::EmptySentinel)
	);
	assert_eq!(names(&bow), vec![""]);

	let mut pickaxe = fx.ctx().open(fx.item("PICKAXE", &[""])).unwrap();
	assert_eq!(pickaxe.try_bind(fx.enhancement("prospecting")), Ok(0));
}

#[test]
fn test_has_follows_bind_and_remove() {
	let fx = Fixture::new();
	let mut state = fx
		.ctx()
		.open(fx.item("PICKAXE", &["explosive", "", ""]))
		.unwrap();

	assert!(!state.has(""));
	assert!(state.has("Explosive"));
	assert!(!state.has("glowing"));

	assert!(state.bind(fx.enhancement("glowing")));
	assert!(state.has("glowing"));

	assert!(state.remove("explosive"));
	assert!(!state.has("explosive"));
	assert_eq!(names(&state), vec!["", "glowing", ""]);

	assert!(!state.remove("explosive"));
	assert!(!state.remove(""));
	assert_eq!(
		state.try_remove("blink"),
		Err(SlotError::NotBound {
			name: "blink".into()
		})
	);
	assert_eq!(state.occupancy(), 3);
}

#[test]
fn test_missing_field_has_no_sockets() {
	let fx = Fixture::new();
	let mut state = fx.ctx().open(ItemRecord::new("PICKAXE")).unwrap();

	assert_eq!(state.occupancy(), 0);
	assert!(!state.has_empty_slot());
	assert_eq!(
		state.try_bind(fx.enhancement("explosive")),
		Err(SlotError::NoEmptySlot)
	);
	assert!(state.item().attributes.is_empty());
}

#[test]
fn test_orphans_survive_commit() {
	let fx = Fixture::new();
	let state = fx
		.ctx()
		.open(fx.item("PICKAXE", &["ghost", "explosive", ""]))
		.unwrap();

	assert_eq!(state.orphans().collect::<Vec<_>>(), vec!["ghost"]);
	assert_eq!(
		state.enhancements().map(|e| e.name()).collect::<Vec<_>>(),
		vec!["explosive"]
	);
	let orphaned: Vec<_> = state.resolved().map(Resolution::is_orphaned).collect();
	assert_eq!(orphaned, vec![true, false, false]);

	let item = state.commit();
	assert_eq!(
		fx.codec.read(&item).unwrap(),
		["ghost", "explosive", ""].into_iter().collect::<SlotList>()
	);
	let lines: Vec<_> = item.display.iter().map(DisplayLine::to_plain).collect();
	assert_eq!(
		lines,
		vec!["[ Empty Socket ]", "explosive", "[ Empty Socket ]"]
	);
}

#[test]
fn test_dropped_state_leaves_item_untouched() {
	let fx = Fixture::new();
	let mut item = fx.item("PICKAXE", &["", "", ""]);
	{
		let mut state = fx.ctx().open(&mut item).unwrap();
		assert!(state.bind(fx.enhancement("blink")));
	}
	assert_eq!(fx.codec.names(&item), ["", "", ""]);

	let mut state = fx.ctx().open(&mut item).unwrap();
	assert!(state.bind(fx.enhancement("blink")));
	state.commit();
	assert_eq!(fx.codec.names(&item), ["blink", "", ""]);
	assert_eq!(item.display.len(), 3);
}

#[test]
fn test_random_applicable_skips_bound_and_invalid() {
	let fx = Fixture::new();
	let state = fx
		.ctx()
		.open(fx.item("BOW", &["explosive", "a", "b", "c", "capturing"]))
		.unwrap();

	let mut rng = StdRng::seed_from_u64(3);
	for _ in 0..64 {
		let pick = state.random_applicable(&mut rng).unwrap();
		assert!(["blink", "glowing"].contains(&pick.name()), "{}", pick.name());
	}

	let full = fx
		.ctx()
		.open(fx.item(
			"BOW",
			&["explosive", "a", "b", "c", "capturing", "blink", "glowing"],
		))
		.unwrap();
	assert!(full.random_applicable(&mut rng).is_none());
}

#[derive(Debug, Clone)]
enum Op {
	Bind(usize),
	Remove(usize),
	Grow(usize),
	Pop,
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0..NAMES.len()).prop_map(Op::Bind),
		(0..NAMES.len()).prop_map(Op::Remove),
		(0..3usize).prop_map(Op::Grow),
		Just(Op::Pop),
	]
}

proptest! {
	#[test]
	fn prop_guarded_operations_respect_capacity(ops in prop::collection::vec(op(), 0..40)) {
		let fx = Fixture::new();
		let mut state = fx.ctx().open(ItemRecord::new("PICKAXE")).unwrap();

		for op in ops {
			match op {
				Op::Bind(i) => {
					let was_bound = state.has(NAMES[i]);
					let bound = state.bind(fx.enhancement(NAMES[i]));
					prop_assert!(!(was_bound && bound));
					if bound {
						prop_assert!(state.has(NAMES[i]));
					}
				}
				Op::Remove(i) => {
					if state.remove(NAMES[i]) {
						prop_assert!(!state.has(NAMES[i]));
					}
				}
				Op::Grow(n) => {
					let _ = state.try_add_slots(n);
				}
				Op::Pop => {
					state.pop();
				}
			}

			prop_assert!(state.occupancy() <= state.capacity());
			for name in NAMES {
				prop_assert!(state.slots().iter().filter(|s| *s == name).count() <= 1);
			}
		}
	}

	#[test]
	fn prop_bind_then_remove_restores_slots(
		prefill in prop::sample::subsequence(NAMES.to_vec(), 0..3),
		pick in 0..NAMES.len(),
	) {
		let fx = Fixture::new();
		let mut state = fx.ctx().open(fx.item("PICKAXE", &["", "", ""])).unwrap();
		for name in &prefill {
			prop_assert!(state.bind(fx.enhancement(name)));
		}

		let before = state.slots().clone();
		if state.bind(fx.enhancement(NAMES[pick])) {
			prop_assert!(state.remove(NAMES[pick]));
			prop_assert_eq!(state.slots(), &before);
		} else {
			prop_assert!(prefill.contains(&NAMES[pick]));
			prop_assert_eq!(state.slots(), &before);
		}
	}
}
