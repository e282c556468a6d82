//! Inventory - per-item counts indexed by item kind

use crate::entity::kind::{EntityKind, ITEM_COUNT};

/// Item counts. Index is `kind - ITEM_FIRST`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: [u32; ITEM_COUNT],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count; zero for kinds that are not items
    pub fn get(&self, kind: EntityKind) -> u32 {
        kind.item_slot().map(|i| self.counts[i]).unwrap_or(0)
    }

    /// Add items, returns false (and changes nothing) for non-item kinds
    pub fn add(&mut self, kind: EntityKind, amount: u32) -> bool {
        match kind.item_slot() {
            Some(i) => {
                self.counts[i] = self.counts[i].saturating_add(amount);
                true
            }
            None => {
                tracing::warn!("Ignoring inventory add for non-item kind {:?}", kind);
                false
            }
        }
    }

    /// Remove up to `amount`, returns amount actually removed
    pub fn remove(&mut self, kind: EntityKind, amount: u32) -> u32 {
        if let Some(i) = kind.item_slot() {
            let removed = amount.min(self.counts[i]);
            self.counts[i] -= removed;
            removed
        } else {
            0
        }
    }

    /// Check if the inventory holds all listed materials
    pub fn has_materials(&self, requirements: &[(EntityKind, u32)]) -> bool {
        requirements.iter().all(|(kind, amount)| self.get(*kind) >= *amount)
    }

    /// Every item kind with its count, in table order
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, u32)> + '_ {
        EntityKind::items().zip(self.counts.iter().copied())
    }

    pub fn slot_count(&self) -> usize {
        ITEM_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_add_remove() {
        let mut inventory = Inventory::new();
        assert!(inventory.add(EntityKind::ItemPinewood, 5));
        assert_eq!(inventory.get(EntityKind::ItemPinewood), 5);

        assert_eq!(inventory.remove(EntityKind::ItemPinewood, 3), 3);
        assert_eq!(inventory.remove(EntityKind::ItemPinewood, 10), 2);
        assert_eq!(inventory.get(EntityKind::ItemPinewood), 0);
    }

    #[test]
    fn test_non_item_kinds_fail_safe() {
        let mut inventory = Inventory::new();
        assert!(!inventory.add(EntityKind::Tree, 1));
        assert!(!inventory.add(EntityKind::Nil, 1));
        assert_eq!(inventory.get(EntityKind::BuildingFurnace), 0);
        assert_eq!(inventory.remove(EntityKind::Player, 1), 0);
        assert_eq!(inventory, Inventory::new());
    }

    #[test]
    fn test_inventory_has_materials() {
        let mut inventory = Inventory::new();
        inventory.add(EntityKind::ItemRock, 5);
        assert!(inventory.has_materials(&[(EntityKind::ItemRock, 5)]));
        assert!(!inventory.has_materials(&[
            (EntityKind::ItemRock, 5),
            (EntityKind::ItemPinewood, 1)
        ]));
    }

    #[test]
    fn test_iter_in_table_order() {
        let mut inventory = Inventory::new();
        inventory.add(EntityKind::ItemPinewood, 2);
        let all: Vec<_> = inventory.iter().collect();
        assert_eq!(
            all,
            vec![(EntityKind::ItemRock, 0), (EntityKind::ItemPinewood, 2)]
        );
    }
}
