use bevy::prelude::*;
use thiserror::Error;

use crate::item::ItemId;

/// A single slot in the inventory: one item kind and how many are held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub kind: ItemId,
    pub amount: u32,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InventoryError {
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("no slot holds item {0:?}")]
    SlotNotFound(ItemId),
    #[error("slot index {index} out of range for {len} slots")]
    IndexOutOfRange { index: usize, len: usize },
}

/// What a drop did to the inventory and what the world has to spawn for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    pub kind: ItemId,
    /// Units actually taken out of the slot.
    pub removed: u32,
    /// Pickups to spawn. Always the requested amount, even past what was held.
    pub spawn_count: u32,
}

/// Collecting agent's inventory.
///
/// Slots keep first-add order and hold at most one entry per item kind.
#[derive(Component, Debug, Default)]
pub struct Inventory {
    slots: Vec<Slot>,
    current_index: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_slot(&self) -> Option<&Slot> {
        self.slot_by_index(self.current_index)
    }

    /// Adds `amount` units of `kind`, returning the new total held for that kind.
    pub fn add_item(&mut self, kind: ItemId, amount: u32) -> Result<u32, InventoryError> {
        if amount == 0 {
            return Err(InventoryError::ZeroAmount);
        }

        if let Some(slot) = self.slot_by_kind_mut(kind) {
            slot.amount = slot.amount.saturating_add(amount);
            return Ok(slot.amount);
        }

        self.slots.push(Slot { kind, amount });
        Ok(amount)
    }

    /// Takes up to `amount` units of `kind` out of its slot.
    ///
    /// The slot is clamped to zero when `amount` covers everything held, but the
    /// outcome still asks for the full `amount` of pickups to be spawned.
    pub fn drop_item(&mut self, kind: ItemId, amount: u32) -> Result<DropOutcome, InventoryError> {
        if amount == 0 {
            return Err(InventoryError::ZeroAmount);
        }
        let slot = self
            .slot_by_kind_mut(kind)
            .ok_or(InventoryError::SlotNotFound(kind))?;

        let removed = if slot.amount > amount {
            slot.amount -= amount;
            amount
        } else {
            std::mem::take(&mut slot.amount)
        };

        Ok(DropOutcome {
            kind,
            removed,
            spawn_count: amount,
        })
    }

    pub fn drop_item_at(
        &mut self,
        index: usize,
        amount: u32,
    ) -> Result<DropOutcome, InventoryError> {
        let kind = self
            .slot_by_index(index)
            .map(|slot| slot.kind)
            .ok_or(InventoryError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            })?;
        self.drop_item(kind, amount)
    }

    /// Empties every slot and rewinds the cursor. Returns how many slots were removed.
    pub fn clear(&mut self) -> usize {
        self.current_index = 0;
        self.slots.drain(..).count()
    }

    pub fn slot_by_kind(&self, kind: ItemId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    fn slot_by_kind_mut(&mut self, kind: ItemId) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.kind == kind)
    }

    pub fn slot_by_index(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn count_item(&self, kind: ItemId) -> u32 {
        self.slot_by_kind(kind).map_or(0, |slot| slot.amount)
    }

    /// Advances the selection cursor, wrapping once `current + 2` passes the slot count.
    ///
    /// Returns the new index, or `None` when there is nothing to select.
    pub fn scroll(&mut self) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }

        if self.current_index + 2 > self.slots.len() {
            self.current_index = 0;
        } else {
            self.current_index += 1;
        }
        Some(self.current_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COIN: ItemId = ItemId(0);
    const POTION: ItemId = ItemId(1);
    const GEM: ItemId = ItemId(2);

    #[test]
    fn inventory_starts_empty() {
        let inv = Inventory::new();

        assert!(inv.is_empty());
        assert_eq!(inv.current_index(), 0);
        assert!(inv.current_slot().is_none());
    }

    #[test]
    fn add_item_keeps_one_slot_per_kind() {
        let mut inv = Inventory::new();
        let adds = [(COIN, 1), (POTION, 2), (COIN, 4), (GEM, 1), (POTION, 3), (COIN, 2)];

        for (kind, n) in adds {
            inv.add_item(kind, n).unwrap();
        }

        assert_eq!(inv.len(), 3);
        for kind in [COIN, POTION, GEM] {
            let expected: u32 = adds.iter().filter(|(k, _)| *k == kind).map(|(_, n)| n).sum();
            assert_eq!(inv.count_item(kind), expected);
            assert_eq!(inv.slots().iter().filter(|s| s.kind == kind).count(), 1);
        }
    }

    #[test]
    fn add_item_preserves_first_add_order() {
        let mut inv = Inventory::new();
        inv.add_item(POTION, 1).unwrap();
        inv.add_item(COIN, 1).unwrap();
        inv.add_item(POTION, 1).unwrap();

        let order: Vec<ItemId> = inv.slots().iter().map(|s| s.kind).collect();
        assert_eq!(order, [POTION, COIN]);
    }

    #[test]
    fn add_item_returns_new_total() {
        let mut inv = Inventory::new();
        assert_eq!(inv.add_item(COIN, 1), Ok(1));
        assert_eq!(inv.add_item(COIN, 5), Ok(6));
    }

    #[test]
    fn add_item_rejects_zero_amount() {
        let mut inv = Inventory::new();

        assert_eq!(inv.add_item(COIN, 0), Err(InventoryError::ZeroAmount));
        assert!(inv.is_empty());
    }

    #[test]
    fn drop_item_decrements_when_enough_is_held() {
        let mut inv = Inventory::new();
        inv.add_item(POTION, 5).unwrap();

        let outcome = inv.drop_item(POTION, 2).unwrap();

        assert_eq!(inv.count_item(POTION), 3);
        assert_eq!(outcome.removed, 2);
        assert_eq!(outcome.spawn_count, 2);
    }

    #[test]
    fn drop_more_than_held_clamps_to_zero_and_spawns_full_amount() {
        let mut inv = Inventory::new();
        inv.add_item(POTION, 2).unwrap();

        let outcome = inv.drop_item(POTION, 5).unwrap();

        assert_eq!(inv.count_item(POTION), 0);
        assert_eq!(
            outcome,
            DropOutcome {
                kind: POTION,
                removed: 2,
                spawn_count: 5,
            }
        );
        // The emptied slot stays in place.
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn drop_exact_amount_empties_slot() {
        let mut inv = Inventory::new();
        inv.add_item(COIN, 3).unwrap();

        inv.drop_item(COIN, 3).unwrap();
        assert_eq!(inv.count_item(COIN), 0);

        // Dropping from an already-empty slot stays at zero.
        let outcome = inv.drop_item(COIN, 1).unwrap();
        assert_eq!(inv.count_item(COIN), 0);
        assert_eq!(outcome.removed, 0);
        assert_eq!(outcome.spawn_count, 1);
    }

    #[test]
    fn drop_missing_kind_is_an_error_and_changes_nothing() {
        let mut inv = Inventory::new();
        inv.add_item(COIN, 1).unwrap();

        assert_eq!(
            inv.drop_item(POTION, 1),
            Err(InventoryError::SlotNotFound(POTION))
        );
        assert_eq!(inv.count_item(COIN), 1);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn drop_item_at_resolves_slot_index() {
        let mut inv = Inventory::new();
        inv.add_item(COIN, 4).unwrap();
        inv.add_item(POTION, 4).unwrap();

        let outcome = inv.drop_item_at(1, 3).unwrap();

        assert_eq!(outcome.kind, POTION);
        assert_eq!(inv.count_item(POTION), 1);
        assert_eq!(inv.count_item(COIN), 4);
    }

    #[test]
    fn drop_item_at_rejects_out_of_range_index() {
        let mut inv = Inventory::new();
        inv.add_item(COIN, 1).unwrap();

        assert_eq!(
            inv.drop_item_at(1, 1),
            Err(InventoryError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            Inventory::new().drop_item_at(0, 1),
            Err(InventoryError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn clear_empties_any_size() {
        for size in [0usize, 1, 7] {
            let mut inv = Inventory::new();
            for i in 0..size {
                inv.add_item(ItemId(i as u16), 1).unwrap();
            }

            assert_eq!(inv.clear(), size);
            assert!(inv.is_empty());
            assert_eq!(inv.current_index(), 0);
        }
    }

    #[test]
    fn slot_by_index_bounds() {
        let mut inv = Inventory::new();
        assert!(inv.slot_by_index(0).is_none());

        inv.add_item(COIN, 1).unwrap();
        inv.add_item(POTION, 1).unwrap();

        assert_eq!(inv.slot_by_index(0).map(|s| s.kind), Some(COIN));
        assert_eq!(inv.slot_by_index(1).map(|s| s.kind), Some(POTION));
        assert!(inv.slot_by_index(2).is_none());
    }

    #[test]
    fn scroll_on_empty_inventory_is_noop() {
        let mut inv = Inventory::new();
        assert_eq!(inv.scroll(), None);
        assert_eq!(inv.current_index(), 0);
    }

    #[test]
    fn scroll_wraps_with_three_slots() {
        let mut inv = Inventory::new();
        for kind in [COIN, POTION, GEM] {
            inv.add_item(kind, 1).unwrap();
        }

        let visited: Vec<Option<usize>> = (0..3).map(|_| inv.scroll()).collect();
        assert_eq!(visited, [Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn scroll_with_single_slot_stays_at_zero() {
        let mut inv = Inventory::new();
        inv.add_item(COIN, 1).unwrap();

        assert_eq!(inv.scroll(), Some(0));
        assert_eq!(inv.scroll(), Some(0));
    }
}
