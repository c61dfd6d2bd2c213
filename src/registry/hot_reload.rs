//! Hot-reload systems for data assets.

use bevy::asset::AssetEvent;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::RegistryHandles;
use super::agent::AgentConfig;
use super::assets::{ItemCatalogAsset, LevelRegistryAsset};
use super::level::LevelRegistry;

use crate::agent::input::InputMap;
use crate::item::ItemRegistry;

pub(crate) fn hot_reload_agent(
    mut events: MessageReader<AssetEvent<AgentConfig>>,
    handles: Res<RegistryHandles>,
    assets: Res<Assets<AgentConfig>>,
    mut config: ResMut<AgentConfig>,
) {
    for event in events.read() {
        if let AssetEvent::Modified { id } = event
            && *id == handles.agent.id()
            && let Some(asset) = assets.get(&handles.agent)
        {
            *config = asset.clone();
            info!(
                "Hot-reloaded AgentConfig: speed={}, jump={}, reach={}",
                asset.speed, asset.jump_velocity, asset.interaction_distance
            );
        }
    }
}

/// Item ids are catalog positions, so reordering the catalog remaps held slots.
pub(crate) fn hot_reload_items(
    mut events: MessageReader<AssetEvent<ItemCatalogAsset>>,
    handles: Res<RegistryHandles>,
    assets: Res<Assets<ItemCatalogAsset>>,
    mut registry: ResMut<ItemRegistry>,
) {
    for event in events.read() {
        if let AssetEvent::Modified { id } = event
            && *id == handles.items.id()
            && let Some(asset) = assets.get(&handles.items)
        {
            *registry = ItemRegistry::from_defs(asset.items.clone());
            info!("Hot-reloaded ItemRegistry ({} items)", asset.items.len());
        }
    }
}

pub(crate) fn hot_reload_input(
    mut commands: Commands,
    mut events: MessageReader<AssetEvent<InputMap>>,
    handles: Res<RegistryHandles>,
    assets: Res<Assets<InputMap>>,
) {
    for event in events.read() {
        if let AssetEvent::Modified { id } | AssetEvent::LoadedWithDependencies { id } = event
            && *id == handles.input.id()
            && let Some(asset) = assets.get(&handles.input)
        {
            commands.insert_resource(asset.clone());
            info!("Hot-reloaded InputMap ({} actions)", asset.actions.len());
        }
    }
}

/// Takes effect on the next level load.
pub(crate) fn hot_reload_levels(
    mut events: MessageReader<AssetEvent<LevelRegistryAsset>>,
    handles: Res<RegistryHandles>,
    assets: Res<Assets<LevelRegistryAsset>>,
    mut registry: ResMut<LevelRegistry>,
) {
    for event in events.read() {
        if let AssetEvent::Modified { id } = event
            && *id == handles.levels.id()
            && let Some(asset) = assets.get(&handles.levels)
        {
            *registry = LevelRegistry::from_defs(asset.levels.clone());
            info!("Hot-reloaded LevelRegistry ({} levels)", asset.levels.len());
        }
    }
}
