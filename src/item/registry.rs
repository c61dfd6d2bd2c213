use std::collections::HashMap;

use bevy::prelude::*;

use super::definition::ItemDef;

/// Compact item kind identifier. Index into ItemRegistry.defs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemId(pub u16);

/// Registry of all item kinds. Inserted as a Resource after asset loading.
#[derive(Resource, Debug, Default)]
pub struct ItemRegistry {
    defs: Vec<ItemDef>,
    name_to_id: HashMap<String, ItemId>,
}

impl ItemRegistry {
    /// Build registry from a list of ItemDefs. Order = ItemId index.
    pub fn from_defs(defs: Vec<ItemDef>) -> Self {
        let name_to_id = defs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), ItemId(i as u16)))
            .collect();
        Self { defs, name_to_id }
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemDef> {
        self.defs.get(id.0 as usize)
    }

    pub fn by_name(&self, name: &str) -> Option<ItemId> {
        self.name_to_id.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ItemDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, d)| (ItemId(i as u16), d))
    }
}
