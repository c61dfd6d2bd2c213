use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use super::level::LevelDef;
use crate::item::ItemDef;

/// Asset loaded from items.catalog.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct ItemCatalogAsset {
    pub items: Vec<ItemDef>,
}

/// Asset loaded from levels.registry.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct LevelRegistryAsset {
    pub levels: Vec<LevelDef>,
}
