use rand::Rng;
use socketry_registry::Enhancement;

/// Draws one enhancement from `pool`, weighted by [`Rarity::weight`].
///
/// Returns `None` when the pool is empty or every weight is zero.
///
/// [`Rarity::weight`]: socketry_primitives::Rarity::weight
pub fn pick_weighted<'a, R>(
	pool: impl IntoIterator<Item = &'a dyn Enhancement>,
	rng: &mut R,
) -> Option<&'a dyn Enhancement>
where
	R: Rng + ?Sized,
{
	let weighted: Vec<_> = pool
		.into_iter()
		.map(|e| (e, e.rarity().weight()))
		.filter(|(_, w)| *w > 0)
		.collect();
	let total: u32 = weighted.iter().map(|(_, w)| w).sum();
	if total == 0 {
		return None;
	}

	let mut roll = rng.random_range(0..total);
	for (enhancement, weight) in &weighted {
		if roll < *weight {
			return Some(*enhancement);
		}
		roll -= weight;
	}
	None
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use socketry_primitives::{DisplayLine, Rarity};
	use socketry_registry::Candidate;

	use super::*;

	struct Tier(&'static str, Rarity);

	impl Enhancement for Tier {
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

	#[test]
	fn test_empty_pool_yields_none() {
		let mut rng = StdRng::seed_from_u64(7);
		assert!(pick_weighted(std::iter::empty(), &mut rng).is_none());
	}

	#[test]
	fn test_single_entry_always_wins() {
		let only = Tier("only", Rarity::Legendary);
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..16 {
			let pick = pick_weighted([&only as &dyn Enhancement], &mut rng).unwrap();
			assert_eq!(pick.name(), "only");
		}
	}

	#[test]
	fn test_common_outweighs_legendary() {
		let common = Tier("common", Rarity::Common);
		let legendary = Tier("legendary", Rarity::Legendary);
		let pool: [&dyn Enhancement; 2] = [&common, &legendary];

		let mut rng = StdRng::seed_from_u64(42);
		let commons = (0..2_000)
			.filter(|_| pick_weighted(pool, &mut rng).unwrap().name() == "common")
			.count();
		// Expected share is 60 / 61.
		assert!(commons > 1_850, "common drawn {commons} times");
	}
}
