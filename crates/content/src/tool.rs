use socketry_primitives::ItemKind;

/// Coarse grouping of item kinds, derived from the kind's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolClass {
	Pickaxe,
	Shovel,
	Axe,
	Sword,
	Bow,
}

impl ToolClass {
	/// Classifies `kind` by suffix: `DIAMOND_PICKAXE` and `PICKAXE` are both pickaxes.
	pub fn of(kind: &ItemKind) -> Option<Self> {
		let name = kind.as_str();
		let suffix = name.rsplit('_').next().unwrap_or(name);
		match suffix {
			"PICKAXE" => Some(Self::Pickaxe),
			"SHOVEL" | "SPADE" => Some(Self::Shovel),
			"AXE" => Some(Self::Axe),
			"SWORD" => Some(Self::Sword),
			"BOW" | "CROSSBOW" => Some(Self::Bow),
			_ => None,
		}
	}

	pub fn is_digging(self) -> bool {
		matches!(self, Self::Pickaxe | Self::Shovel)
	}

	pub fn is_weapon(self) -> bool {
		matches!(self, Self::Sword | Self::Axe | Self::Bow)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classify_by_suffix() {
		assert_eq!(ToolClass::of(&ItemKind::new("pickaxe")), Some(ToolClass::Pickaxe));
		assert_eq!(
			ToolClass::of(&ItemKind::new("diamond_pickaxe")),
			Some(ToolClass::Pickaxe)
		);
		assert_eq!(ToolClass::of(&ItemKind::new("golden axe")), Some(ToolClass::Axe));
		assert_eq!(ToolClass::of(&ItemKind::new("CROSSBOW")), Some(ToolClass::Bow));
		assert_eq!(ToolClass::of(&ItemKind::new("STICK")), None);
	}

	#[test]
	fn test_class_groups() {
		assert!(ToolClass::Shovel.is_digging());
		assert!(!ToolClass::Sword.is_digging());
		assert!(ToolClass::Bow.is_weapon());
		assert!(!ToolClass::Pickaxe.is_weapon());
	}
}
