//! Building table - per-building recipe and placement bookkeeping

use std::fmt;

use crate::entity::kind::{EntityKind, BUILDING_COUNT};
use crate::memory::arena::{Arena, ArenaError, ArenaRef};

/// Per-building auxiliary data. Index is `kind - BUILDING_FIRST`.
#[derive(Debug, Clone, Copy)]
pub struct BuildingData {
    /// Materials listed for this building
    pub recipe: &'static [(EntityKind, u32)],
    /// Number placed in the world so far
    pub placed: u32,
    /// Menu label interned in the persistent arena
    pub label: Option<ArenaRef>,
}

const FURNACE_RECIPE: &[(EntityKind, u32)] = &[(EntityKind::ItemRock, 5)];
const WORKBENCH_RECIPE: &[(EntityKind, u32)] = &[(EntityKind::ItemPinewood, 4)];

static FALLBACK: BuildingData = BuildingData {
    recipe: &[],
    placed: 0,
    label: None,
};

#[derive(Debug, Clone)]
pub struct BuildingTable {
    entries: [BuildingData; BUILDING_COUNT],
}

impl Default for BuildingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildingTable {
    pub fn new() -> Self {
        let entry = |recipe| BuildingData {
            recipe,
            placed: 0,
            label: None,
        };
        Self {
            entries: [entry(FURNACE_RECIPE), entry(WORKBENCH_RECIPE)],
        }
    }

    /// Entry for a building kind; an empty neutral entry for anything else
    pub fn get(&self, kind: EntityKind) -> &BuildingData {
        match kind.building_slot() {
            Some(i) => &self.entries[i],
            None => {
                tracing::warn!("No building data for {:?}", kind);
                &FALLBACK
            }
        }
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> Option<&mut BuildingData> {
        kind.building_slot().map(|i| &mut self.entries[i])
    }

    pub fn record_placed(&mut self, kind: EntityKind) {
        if let Some(entry) = self.get_mut(kind) {
            entry.placed += 1;
        }
    }

    /// Write every menu label ("Furnace: 5 Rock") into `arena`
    pub fn intern_labels(&mut self, arena: &mut Arena) -> Result<(), ArenaError> {
        for (kind, entry) in EntityKind::buildings().zip(self.entries.iter_mut()) {
            let label = arena.alloc_fmt(format_args!(
                "{}: {}",
                kind.display_name(),
                RecipeText(entry.recipe)
            ))?;
            entry.label = Some(label);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &BuildingData)> + '_ {
        EntityKind::buildings().zip(self.entries.iter())
    }
}

/// "5 Rock, 2 Pinewood"
struct RecipeText(&'static [(EntityKind, u32)]);

impl fmt::Display for RecipeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, amount)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", amount, kind.display_name())?;
        }
        Ok(())
    }
}
